//! Defines the endpoint for creating a new transaction.
use std::sync::{Arc, Mutex};

use axum::{
    Json,
    extract::{FromRef, State, rejection::JsonRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use rusqlite::Connection;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::{
    AppState, Error,
    transaction::{Amount, Transaction, TransactionBuilder, core::create_transaction},
};

/// The state needed to create a transaction.
#[derive(Debug, Clone)]
pub struct CreateTransactionState {
    /// The database connection for managing transactions.
    pub db_connection: Arc<Mutex<Connection>>,
}

impl FromRef<AppState> for CreateTransactionState {
    fn from_ref(state: &AppState) -> Self {
        Self {
            db_connection: state.db_connection.clone(),
        }
    }
}

/// The JSON body of a request to create a transaction.
///
/// Every field is optional here so that a missing field is reported as
/// [Error::MissingFields] rather than as a JSON parsing error. The text fields
/// take any JSON value so that e.g. a numeric `user_id` is stored as text
/// instead of rejecting the whole body.
#[derive(Debug, Default, Deserialize)]
pub struct CreateTransactionRequest {
    /// A short description of what the transaction was for.
    pub title: Option<Value>,
    /// The amount of the transaction, either a JSON number or a numeric string.
    ///
    /// `None` means the field was absent. An explicit `null` is kept as
    /// `Some(Value::Null)` and fails when it is converted to an [Amount].
    #[serde(default, deserialize_with = "deserialize_present")]
    pub amount: Option<Value>,
    /// The category of the transaction.
    pub category: Option<Value>,
    /// The ID of the user who owns the transaction.
    pub user_id: Option<Value>,
}

fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

/// Convert a text field to a string, or `None` if it counts as missing.
///
/// `null`, `""`, `false` and `0` count as missing. Strings are taken as is,
/// other numbers and `true` use their JSON text, and arrays and objects are
/// stored as JSON.
fn text_field(field: Option<Value>) -> Option<String> {
    match field? {
        Value::Null | Value::Bool(false) => None,
        Value::String(text) if text.is_empty() => None,
        Value::String(text) => Some(text),
        Value::Number(number) if number.as_f64() == Some(0.0) => None,
        other => Some(other.to_string()),
    }
}

impl CreateTransactionRequest {
    /// Check that every required field is present and convert the request
    /// into a [TransactionBuilder].
    ///
    /// Only the presence of `amount` is validated. Its value is converted
    /// afterwards, so any number (including zero and negative numbers) passes
    /// validation.
    ///
    /// # Errors
    /// This function will return a:
    /// - [Error::MissingFields] if `title`, `category` or `user_id` is missing, empty, `null`, `false` or `0`, or if `amount` is missing,
    /// - or [Error::InvalidAmount] if `amount` cannot be converted to an [Amount].
    pub fn into_builder(self) -> Result<TransactionBuilder, Error> {
        let (Some(title), Some(amount), Some(category), Some(user_id)) = (
            text_field(self.title),
            self.amount,
            text_field(self.category),
            text_field(self.user_id),
        ) else {
            return Err(Error::MissingFields);
        };

        let amount = Amount::try_from(&amount)?;

        Ok(Transaction::build(&user_id, &title, amount, &category))
    }
}

/// A route handler for creating a new transaction.
///
/// Responds with `201 Created` and the stored transaction as JSON on success.
pub async fn create_transaction_endpoint(
    State(state): State<CreateTransactionState>,
    request: Result<Json<CreateTransactionRequest>, JsonRejection>,
) -> Response {
    let Json(request) = match request {
        Ok(request) => request,
        Err(rejection) => {
            tracing::debug!("rejected request body: {rejection}");
            return Error::InvalidRequestBody(rejection.body_text()).into_response();
        }
    };

    let builder = match request.into_builder() {
        Ok(builder) => builder,
        Err(Error::MissingFields) => {
            tracing::debug!("rejected transaction with missing fields");
            return Error::MissingFields.into_response();
        }
        Err(error) => {
            tracing::error!("could not create transaction: {error}");
            return error.into_response();
        }
    };

    let connection = match state.db_connection.lock() {
        Ok(connection) => connection,
        Err(error) => {
            tracing::error!("could not acquire database lock: {error}");
            return Error::DatabaseLockError.into_response();
        }
    };

    match create_transaction(builder, &connection) {
        Ok(transaction) => {
            tracing::info!("Transaction created successfully with ID {}", transaction.id);
            (StatusCode::CREATED, Json(transaction)).into_response()
        }
        Err(error) => {
            tracing::error!("could not store transaction: {error}");
            error.into_response()
        }
    }
}
