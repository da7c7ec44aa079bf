#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::response::Response;
use axum::Router;
use bson::{oid::ObjectId, Document};
use http_body_util::BodyExt;
use serde::de::Error as _;
use serde_json::Value;
use tower::ServiceExt;

use tuition_registry::config::Config;
use tuition_registry::db::{Store, StoreError, StoreResult};
use tuition_registry::models::month::{MonthEntry, MONTHS_COLLECTION};
use tuition_registry::models::student::{Student, StudentFilter, StudentUpdate};
use tuition_registry::{routes, AppState};

pub const CLIENT_ORIGIN: &str = "http://localhost:5173";

/// In-process `Store` keeping raw documents per collection.
#[derive(Default)]
pub struct MemoryStore {
    collections: Mutex<HashMap<String, Vec<Document>>>,
    months: Mutex<Vec<MonthEntry>>,
    failing: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Make every subsequent call fail as if the database were unreachable.
    pub fn fail_all(&self) {
        self.failing.store(true, Ordering::SeqCst);
    }

    pub fn seed(&self, collection: &str, doc: Document) {
        self.collections
            .lock()
            .unwrap()
            .entry(collection.to_string())
            .or_default()
            .push(doc);
    }

    pub fn seed_student(&self, collection: &str, student: &Student) {
        self.seed(collection, bson::to_document(student).unwrap());
    }

    pub fn documents(&self, collection: &str) -> Vec<Document> {
        self.collections
            .lock()
            .unwrap()
            .get(collection)
            .cloned()
            .unwrap_or_default()
    }

    pub fn students(&self, collection: &str) -> Vec<Student> {
        self.documents(collection)
            .into_iter()
            .map(|doc| bson::from_document(doc).unwrap())
            .collect()
    }

    pub fn month_entries(&self) -> Vec<MonthEntry> {
        self.months.lock().unwrap().clone()
    }

    fn check(&self) -> StoreResult<()> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(StoreError::Decode(bson::de::Error::custom("store unavailable")));
        }
        Ok(())
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn insert_student(&self, collection: &str, student: &Student) -> StoreResult<()> {
        self.check()?;
        let doc = bson::to_document(student)?;
        self.seed(collection, doc);
        Ok(())
    }

    async fn find_students(
        &self,
        collection: &str,
        filter: &StudentFilter,
    ) -> StoreResult<Vec<Student>> {
        self.check()?;
        let mut students = Vec::new();
        for doc in self.documents(collection) {
            let student: Student = bson::from_document(doc)?;
            if filter.matches(&student) {
                students.push(student);
            }
        }
        Ok(students)
    }

    async fn find_documents(&self, collection: &str) -> StoreResult<Vec<Document>> {
        self.check()?;
        Ok(self.documents(collection))
    }

    async fn insert_students(&self, collection: &str, students: &[Student]) -> StoreResult<usize> {
        self.check()?;
        for student in students {
            self.seed(collection, bson::to_document(student)?);
        }
        Ok(students.len())
    }

    async fn update_student(
        &self,
        collection: &str,
        id: ObjectId,
        update: &StudentUpdate,
    ) -> StoreResult<u64> {
        self.check()?;
        let mut collections = self.collections.lock().unwrap();
        let mut matched = 0;
        if let Some(docs) = collections.get_mut(collection) {
            for doc in docs.iter_mut().filter(|d| d.get_object_id("_id").ok() == Some(id)) {
                for (key, value) in update.set_document() {
                    doc.insert(key, value);
                }
                matched += 1;
            }
        }
        Ok(matched)
    }

    async fn insert_month(&self, entry: &MonthEntry) -> StoreResult<()> {
        self.check()?;
        self.months.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn list_months(&self) -> StoreResult<Vec<MonthEntry>> {
        self.check()?;
        Ok(self.month_entries())
    }

    async fn list_collections(&self) -> StoreResult<Vec<String>> {
        self.check()?;
        let mut names: Vec<String> = self.collections.lock().unwrap().keys().cloned().collect();
        if !self.months.lock().unwrap().is_empty() {
            names.push(MONTHS_COLLECTION.to_string());
        }
        names.sort();
        Ok(names)
    }

    async fn ping(&self) -> StoreResult<()> {
        self.check()
    }
}

pub fn test_config() -> Config {
    Config {
        mongodb_uri: "mongodb://localhost:27017".to_string(),
        database: "magnete_test".to_string(),
        client_origin: CLIENT_ORIGIN.to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
    }
}

/// Build the production router over the given in-memory store.
pub fn build_test_app(store: Arc<MemoryStore>) -> Router {
    let state = AppState::new(store, Arc::new(test_config()));
    routes::router(state).unwrap()
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Response {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.oneshot(request).await.unwrap()
}

pub async fn send_raw(app: Router, method: Method, uri: &str, raw: &str) -> Response {
    let request = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(raw.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_bytes(response: Response) -> Vec<u8> {
    response.into_body().collect().await.unwrap().to_bytes().to_vec()
}

pub async fn body_json(response: Response) -> Value {
    serde_json::from_slice(&body_bytes(response).await).unwrap()
}

/// Send a request and return the status with the decoded JSON body.
pub async fn call(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let response = send(app, method, uri, body).await;
    let status = response.status();
    (status, body_json(response).await)
}

pub fn student_json(name: &str, phone: &str, aadhaar: &str) -> Value {
    serde_json::json!({
        "name": name,
        "phone": phone,
        "aadhaar": aadhaar,
        "photo": format!("https://img.example/{phone}.jpg"),
        "aadhaar_photo": format!("https://img.example/{phone}-id.jpg"),
        "father_name": "Suresh Kumar",
        "address": "4 Library Lane",
        "seat_number": 12,
        "is_active": true
    })
}

pub fn student(name: &str, phone: &str, aadhaar: &str) -> Student {
    Student {
        id: ObjectId::new(),
        name: name.to_string(),
        phone: phone.to_string(),
        aadhaar: aadhaar.to_string(),
        photo: "https://img.example/p.jpg".to_string(),
        aadhaar_photo: "https://img.example/a.jpg".to_string(),
        father_name: "Suresh Kumar".to_string(),
        address: "4 Library Lane".to_string(),
        register_date: "2024-01-05T10:00:00Z".to_string(),
        seat_number: 1,
        amount_paid: true,
        is_active: true,
    }
}
