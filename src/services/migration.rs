use bson::Document;

use crate::{
    db::{Store, StoreError},
    models::{
        migration::{MigrateRequest, MigrationReport, SkippedDocument},
        student::{registration_timestamp, Student},
    },
    services::{
        collections::ensure_student_collection, validate, with_timeout, ServiceError,
        STUDENT_TIMEOUT,
    },
};

pub struct MigrationService;

impl MigrationService {
    /// Copy every student of `from` into `to` with fresh ids, a fresh
    /// registration date and payment reset. `from` is left untouched.
    ///
    /// Documents that fail to decode are reported in the result rather than
    /// aborting the migration. The fetch and the insert share one deadline.
    pub async fn migrate(
        store: &dyn Store,
        req: &MigrateRequest,
    ) -> Result<MigrationReport, ServiceError> {
        validate(req)?;
        ensure_student_collection(&req.from)?;
        ensure_student_collection(&req.to)?;
        if req.from == req.to {
            return Err(ServiceError::BadRequest(
                "from and to must name different months".into(),
            ));
        }

        let report = with_timeout(STUDENT_TIMEOUT, async {
            let docs = store.find_documents(&req.from).await?;
            let (students, skipped) = reissue_documents(docs, &registration_timestamp());
            let count = store.insert_students(&req.to, &students).await?;
            Ok::<_, StoreError>(MigrationReport::new(count, skipped))
        })
        .await?;

        for skip in &report.skipped {
            tracing::warn!(
                from = %req.from,
                id = skip.id.as_deref().unwrap_or("<none>"),
                reason = %skip.reason,
                "student skipped during migration"
            );
        }
        tracing::info!(from = %req.from, to = %req.to, count = report.count, "month migrated");
        Ok(report)
    }
}

/// Decode source documents and re-issue each one for the target month.
pub fn reissue_documents(
    docs: Vec<Document>,
    register_date: &str,
) -> (Vec<Student>, Vec<SkippedDocument>) {
    let mut students = Vec::with_capacity(docs.len());
    let mut skipped = Vec::new();

    for doc in docs {
        let id = doc.get_object_id("_id").ok().map(|id| id.to_hex());
        match bson::from_document::<Student>(doc) {
            Ok(student) => students.push(student.reissued(register_date)),
            Err(e) => skipped.push(SkippedDocument {
                id,
                reason: e.to_string(),
            }),
        }
    }

    (students, skipped)
}
