use crate::domain::ports::Storage;
use crate::utils::error::Result;
use serde::{de::DeserializeOwned, Serialize};
use std::marker::PhantomData;
use tokio::sync::{Mutex, MutexGuard};

/// A row type stored in one spreadsheet file.
pub trait SheetRow: Serialize + DeserializeOwned + Send + Sync {
    /// Sheet name used in logs.
    const SHEET: &'static str;
    /// Header row; must match the serialized field names in order.
    const HEADERS: &'static [&'static str];

    fn id(&self) -> &str;
}

/// One table backed by a CSV file with a header row.
///
/// Every mutation rewrites the whole file. Callers take the table lock
/// around a load-modify-save cycle so writers never interleave.
pub struct Sheet<R: SheetRow> {
    file_name: String,
    lock: Mutex<()>,
    _row: PhantomData<fn() -> R>,
}

impl<R: SheetRow> Sheet<R> {
    pub fn new(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
            lock: Mutex::new(()),
            _row: PhantomData,
        }
    }

    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    pub async fn lock(&self) -> MutexGuard<'_, ()> {
        self.lock.lock().await
    }

    /// 讀取所有資料列；檔案不存在時先建立只含標題列的檔案
    pub async fn load<S: Storage>(&self, storage: &S) -> Result<Vec<R>> {
        let data = match storage.read_file(&self.file_name).await {
            Ok(data) => data,
            Err(e) if e.is_missing_file() => {
                tracing::info!("📄 Creating {} sheet at {}", R::SHEET, self.file_name);
                self.save(storage, &[]).await?;
                return Ok(Vec::new());
            }
            Err(e) => return Err(e),
        };

        let rows = decode::<R>(&data)?;
        tracing::debug!("Loaded {} rows from {} sheet", rows.len(), R::SHEET);
        Ok(rows)
    }

    pub async fn save<S: Storage>(&self, storage: &S, rows: &[R]) -> Result<()> {
        let data = encode(rows)?;
        storage.write_file(&self.file_name, &data).await?;
        tracing::debug!("Saved {} rows to {} sheet", rows.len(), R::SHEET);
        Ok(())
    }

    pub async fn find<S: Storage>(&self, storage: &S, id: &str) -> Result<Option<R>> {
        let _guard = self.lock().await;
        Ok(self.load(storage).await?.into_iter().find(|row| row.id() == id))
    }

    pub async fn all<S: Storage>(&self, storage: &S) -> Result<Vec<R>> {
        let _guard = self.lock().await;
        self.load(storage).await
    }
}

pub fn decode<R: SheetRow>(data: &[u8]) -> Result<Vec<R>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::Headers)
        .from_reader(data);

    let mut rows = Vec::new();
    for record in reader.deserialize() {
        rows.push(record?);
    }
    Ok(rows)
}

pub fn encode<R: SheetRow>(rows: &[R]) -> Result<Vec<u8>> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(Vec::new());

    writer.write_record(R::HEADERS)?;
    for row in rows {
        writer.serialize(row)?;
    }

    writer
        .into_inner()
        .map_err(|e| crate::utils::error::RentalError::IoError(e.into_error()))
}
