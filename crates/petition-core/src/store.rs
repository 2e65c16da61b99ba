//! Remote list-and-insert store contract.
//!
//! The hosted backend owns persistence. This module only fixes the boundary
//! the form and the admin pages consume: ranged reads in a chosen order and
//! single-row inserts that echo the stored row back.

use crate::petition::{NewPetitioner, Petitioner};
use chrono::Utc;
use thiserror::Error;

/// Rows requested per ranged read.
pub const PAGE_SIZE: usize = 1000;

const NETWORK_FAILURE_MARKER: &str = "Failed to fetch";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The backend could not be reached at all.
    #[error("connection failed: {0}")]
    Connection(String),
    /// The backend answered with an error.
    #[error("{0}")]
    Backend(String),
}

impl StoreError {
    /// Classify a raw client error message.
    pub fn from_message(message: impl Into<String>) -> Self {
        let message = message.into();
        if message.contains(NETWORK_FAILURE_MARKER) {
            Self::Connection(message)
        } else {
            Self::Backend(message)
        }
    }

    /// Message shown when loading the supporter list fails.
    pub fn load_message(&self) -> String {
        match self {
            Self::Connection(_) => "Gagal terhubung ke server. Mohon periksa koneksi internet Anda. \
                                    Jika masalah berlanjut, mungkin ada masalah konfigurasi jaringan \
                                    (CORS) di sisi server."
                .to_string(),
            Self::Backend(msg) => format!("Gagal memuat data pendukung: {msg}"),
        }
    }

    /// Message shown when submitting a signature fails.
    pub fn submit_message(&self) -> String {
        match self {
            Self::Connection(_) => "Gagal terhubung ke server untuk mengirim dukungan. \
                                    Mohon periksa koneksi internet Anda dan coba lagi."
                .to_string(),
            Self::Backend(msg) => {
                format!("Terjadi kesalahan saat mengirim dukungan Anda: {msg}")
            }
        }
    }

    /// Message shown when the report page cannot load its data.
    /// Connection failures are not singled out here.
    pub fn report_message(&self) -> String {
        let (Self::Connection(msg) | Self::Backend(msg)) = self;
        format!("Gagal memuat data laporan: {msg}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OrderColumn {
    Id,
    CreatedAt,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Order {
    pub column: OrderColumn,
    pub ascending: bool,
}

impl Order {
    /// Newest first, as the public page shows supporters.
    pub const NEWEST_FIRST: Order = Order {
        column: OrderColumn::CreatedAt,
        ascending: false,
    };

    /// Insertion order, as the admin table loads them.
    pub const BY_ID: Order = Order {
        column: OrderColumn::Id,
        ascending: true,
    };
}

pub trait PetitionStore {
    /// Rows `from..=to` (0-based, inclusive) in `order`, or storage order
    /// when `order` is `None`. A short or empty result means the end.
    fn fetch_range(
        &self,
        order: Option<Order>,
        from: usize,
        to: usize,
    ) -> Result<Vec<Petitioner>, StoreError>;

    /// Store one row and return it with its assigned id and timestamp.
    fn insert(&mut self, row: NewPetitioner) -> Result<Petitioner, StoreError>;
}

/// Read every row by walking `PAGE_SIZE` ranges until a short page.
pub fn fetch_all<S: PetitionStore + ?Sized>(
    store: &S,
    order: Option<Order>,
) -> Result<Vec<Petitioner>, StoreError> {
    let mut all = Vec::new();
    let mut page = 0;
    loop {
        let from = page * PAGE_SIZE;
        let rows = store.fetch_range(order, from, from + PAGE_SIZE - 1)?;
        let len = rows.len();
        log::debug!("fetched page {page}: {len} rows");
        all.extend(rows);
        if len < PAGE_SIZE {
            break;
        }
        page += 1;
    }
    Ok(all)
}

/// In-process store. Assigns increasing ids and the current UTC time.
#[derive(Debug, Default)]
pub struct MemoryStore {
    rows: Vec<Petitioner>,
    next_id: i64,
    fail_with: Option<StoreError>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent call fail with `err`.
    pub fn fail_with(&mut self, err: StoreError) {
        self.fail_with = Some(err);
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn check(&self) -> Result<(), StoreError> {
        match &self.fail_with {
            Some(err) => Err(err.clone()),
            None => Ok(()),
        }
    }
}

impl PetitionStore for MemoryStore {
    fn fetch_range(
        &self,
        order: Option<Order>,
        from: usize,
        to: usize,
    ) -> Result<Vec<Petitioner>, StoreError> {
        self.check()?;
        let mut rows = self.rows.clone();
        if let Some(order) = order {
            rows.sort_by(|a, b| {
                let ord = match order.column {
                    OrderColumn::Id => a.id.cmp(&b.id),
                    OrderColumn::CreatedAt => a.created_at.cmp(&b.created_at),
                };
                if order.ascending { ord } else { ord.reverse() }
            });
        }
        let start = from.min(rows.len());
        let end = to.saturating_add(1).min(rows.len());
        Ok(rows.drain(start..end.max(start)).collect())
    }

    fn insert(&mut self, row: NewPetitioner) -> Result<Petitioner, StoreError> {
        self.check()?;
        self.next_id += 1;
        let stored = Petitioner {
            id: self.next_id,
            created_at: Some(Utc::now()),
            name: row.name,
            position: row.position,
            address: row.address,
            signature: row.signature.into_data_url(),
        };
        self.rows.push(stored.clone());
        Ok(stored)
    }
}
