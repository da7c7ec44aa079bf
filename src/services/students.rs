use bson::oid::ObjectId;

use crate::{
    db::Store,
    models::student::{
        registration_timestamp, Student, StudentFilter, StudentPayload, StudentUpdate,
    },
    services::{
        collections::ensure_student_collection, validate, with_timeout, ServiceError,
        STUDENT_TIMEOUT,
    },
};

pub struct StudentService;

impl StudentService {
    pub async fn create(
        store: &dyn Store,
        month: &str,
        payload: StudentPayload,
    ) -> Result<Student, ServiceError> {
        ensure_student_collection(month)?;
        validate(&payload)?;

        let student = payload.into_student(ObjectId::new(), registration_timestamp());
        with_timeout(STUDENT_TIMEOUT, store.insert_student(month, &student)).await?;
        tracing::info!(month, id = %student.id, "student registered");
        Ok(student)
    }

    pub async fn list(store: &dyn Store, month: &str) -> Result<Vec<Student>, ServiceError> {
        ensure_student_collection(month)?;
        with_timeout(STUDENT_TIMEOUT, store.find_students(month, &StudentFilter::All)).await
    }

    pub async fn search(
        store: &dyn Store,
        month: &str,
        query: &str,
    ) -> Result<Vec<Student>, ServiceError> {
        ensure_student_collection(month)?;
        let filter = StudentFilter::Search(query.to_string());
        with_timeout(STUDENT_TIMEOUT, store.find_students(month, &filter)).await
    }

    /// Apply `update` to the student `id` in `month`. An id that matches
    /// nothing is not an error.
    pub async fn update(
        store: &dyn Store,
        month: &str,
        id: &str,
        update: StudentUpdate,
    ) -> Result<(), ServiceError> {
        ensure_student_collection(month)?;
        let id = parse_id(id)?;
        if let StudentUpdate::Replace(payload) = &update {
            validate(payload)?;
        }

        let matched = with_timeout(STUDENT_TIMEOUT, store.update_student(month, id, &update)).await?;
        if matched == 0 {
            tracing::debug!(month, %id, "update matched no student");
        }
        Ok(())
    }
}

pub fn parse_id(raw: &str) -> Result<ObjectId, ServiceError> {
    ObjectId::parse_str(raw).map_err(|_| ServiceError::BadRequest("Invalid student ID".into()))
}
