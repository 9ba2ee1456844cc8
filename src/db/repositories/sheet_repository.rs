use crate::db::models::UploadedSheet;
use crate::db::store::{encode, find_as, Collection, DocumentStore, Filter};
use crate::db::StoreError;

const COLLECTION: Collection = Collection::UploadedSheets;

pub struct SheetRepository;

impl SheetRepository {
    pub async fn create_sheet(
        store: &dyn DocumentStore,
        sheet: &UploadedSheet,
    ) -> Result<(), StoreError> {
        store.insert(COLLECTION, sheet.id, encode(sheet)?).await
    }

    pub async fn list(
        store: &dyn DocumentStore,
        filter: &Filter,
    ) -> Result<Vec<UploadedSheet>, StoreError> {
        find_as(store, COLLECTION, filter).await
    }
}
