use crate::{
    db::Store,
    models::month::{CreateMonthRequest, MonthEntry},
    services::{
        collections::ensure_student_collection, validate, with_timeout, ServiceError,
        METADATA_TIMEOUT,
    },
};

pub struct MonthService;

impl MonthService {
    /// Record a month in the registry. Repeated calls for the same month
    /// and year add duplicate entries.
    pub async fn create(
        store: &dyn Store,
        req: &CreateMonthRequest,
    ) -> Result<MonthEntry, ServiceError> {
        validate(req)?;
        let entry = MonthEntry::new(&req.month, req.year);
        // only register names the student routes will accept
        ensure_student_collection(&entry.collection_name)?;
        with_timeout(METADATA_TIMEOUT, store.insert_month(&entry)).await?;
        tracing::info!(collection = %entry.collection_name, "month registered");
        Ok(entry)
    }

    pub async fn list(store: &dyn Store) -> Result<Vec<MonthEntry>, ServiceError> {
        with_timeout(METADATA_TIMEOUT, store.list_months()).await
    }
}
