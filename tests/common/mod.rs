#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use schemadesk::*;

/// A request the fake service received.
#[derive(Debug, Clone, PartialEq)]
pub enum Call {
    List,
    Create(Table),
    Delete(DeleteTableRequest),
    Rename(RenameTableRequest),
    Edit(EditTableRequest),
}

#[derive(Default)]
struct State {
    tables: Vec<Table>,
    calls: Vec<Call>,
    failing: bool,
}

/// In-memory migration service. Clones share state, so a test can keep a
/// handle after giving one to the controller.
#[derive(Clone, Default)]
pub struct FakeService {
    state: Arc<Mutex<State>>,
}

impl FakeService {
    pub fn with_tables(tables: Vec<Table>) -> Self {
        let service = FakeService::default();
        service.state.lock().unwrap().tables = tables;
        service
    }

    /// Every subsequent call fails with a 500.
    pub fn fail_all(&self) {
        self.state.lock().unwrap().failing = true;
    }

    pub fn recover(&self) {
        self.state.lock().unwrap().failing = false;
    }

    pub fn calls(&self) -> Vec<Call> {
        self.state.lock().unwrap().calls.clone()
    }

    /// Calls other than the initial listing.
    pub fn mutations(&self) -> Vec<Call> {
        self.calls()
            .into_iter()
            .filter(|c| *c != Call::List)
            .collect()
    }

    fn record(&self, call: Call) -> Result<serde_json::Value, ServiceError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        if state.failing {
            return Err(ServiceError::Status {
                status: 500,
                body: "internal error".to_string(),
            });
        }
        Ok(serde_json::json!({"status": "ok"}))
    }
}

#[async_trait]
impl SchemaService for FakeService {
    async fn list_tables(&self) -> Result<Vec<Table>, ServiceError> {
        self.record(Call::List)?;
        Ok(self.state.lock().unwrap().tables.clone())
    }

    async fn create_table(&self, table: &Table) -> Result<serde_json::Value, ServiceError> {
        self.record(Call::Create(table.clone()))
    }

    async fn delete_table(
        &self,
        request: &DeleteTableRequest,
    ) -> Result<serde_json::Value, ServiceError> {
        self.record(Call::Delete(request.clone()))
    }

    async fn rename_table(
        &self,
        request: &RenameTableRequest,
    ) -> Result<serde_json::Value, ServiceError> {
        self.record(Call::Rename(request.clone()))
    }

    async fn edit_table(
        &self,
        request: &EditTableRequest,
    ) -> Result<serde_json::Value, ServiceError> {
        self.record(Call::Edit(request.clone()))
    }
}

pub fn users_table() -> Table {
    Table::new(
        "users",
        vec![Column::new("id", DataType::Integer).with_attribute(DataAttribute::PrimaryKey)],
    )
}

pub fn orders_table() -> Table {
    Table::new(
        "orders",
        vec![
            Column::new("id", DataType::Integer).with_attribute(DataAttribute::PrimaryKey),
            Column::new("placed_at", DataType::Datetime),
        ],
    )
}

/// Controller over a fake service already holding `tables`, after the startup fetch.
pub async fn session(
    tables: Vec<Table>,
) -> (Controller<FakeService>, FakeService, RecordingNotifier) {
    let service = FakeService::with_tables(tables);
    let notifier = RecordingNotifier::new();
    let mut controller = Controller::new(service.clone(), Box::new(notifier.clone()));
    controller.fetch_tables().await.expect("startup fetch");
    (controller, service, notifier)
}
