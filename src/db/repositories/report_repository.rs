use crate::db::models::DailyReport;
use crate::db::store::{encode, find_as, Collection, DocumentStore, Filter};
use crate::db::StoreError;

const COLLECTION: Collection = Collection::DailyReports;

pub struct ReportRepository;

impl ReportRepository {
    pub async fn create_report(
        store: &dyn DocumentStore,
        report: &DailyReport,
    ) -> Result<(), StoreError> {
        store.insert(COLLECTION, report.id, encode(report)?).await
    }

    pub async fn list(
        store: &dyn DocumentStore,
        filter: &Filter,
    ) -> Result<Vec<DailyReport>, StoreError> {
        find_as(store, COLLECTION, filter).await
    }
}
