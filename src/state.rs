use std::sync::Arc;
use tokio::sync::{Mutex, RwLock};

use crate::{
    config::Config,
    ingestion::DocumentIngestion,
    models::{
        eway_bill::sample_eway_bills, input_bill::sample_input_bills, invoice::sample_invoices,
        material::sample_materials, order::sample_orders, tax_return::sample_tax_returns,
        worker::sample_workers, EWayBill, InputBill, Invoice, InvoiceDraft, Material, Order,
        TaxReturn, Worker,
    },
    records::RecordStore,
    session::Session,
};

pub type Store<T> = Arc<RwLock<RecordStore<T>>>;

/// Everything the handlers share. Built once at start-up and cloned into
/// every request; all mutable parts sit behind their own lock.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub session: Arc<Mutex<Session>>,
    pub ingestion: Arc<dyn DocumentIngestion>,
    pub workers: Store<Worker>,
    pub materials: Store<Material>,
    pub input_bills: Store<InputBill>,
    pub orders: Store<Order>,
    pub invoices: Store<Invoice>,
    pub tax_returns: Store<TaxReturn>,
    pub eway_bills: Store<EWayBill>,
    pub invoice_draft: Arc<Mutex<InvoiceDraft>>,
}

impl AppState {
    /// Fresh state seeded with the sample records.
    pub fn new(config: Config, ingestion: Arc<dyn DocumentIngestion>) -> Self {
        Self {
            config: Arc::new(config),
            session: Arc::new(Mutex::new(Session::new())),
            ingestion,
            workers: store(sample_workers()),
            materials: store(sample_materials()),
            input_bills: store(sample_input_bills()),
            orders: store(sample_orders()),
            invoices: store(sample_invoices()),
            tax_returns: store(sample_tax_returns()),
            eway_bills: store(sample_eway_bills()),
            invoice_draft: Arc::new(Mutex::new(InvoiceDraft::new(crate::handlers::today()))),
        }
    }
}

fn store<T: crate::records::Record>(seed: Vec<T>) -> Store<T> {
    Arc::new(RwLock::new(RecordStore::new(seed)))
}
