//! Braintree GraphQL gateway.
//!
//! Two operations are used: `createClientToken` for the browser drop-in and
//! `chargePaymentMethod`, which authorizes a tokenized card and submits the
//! transaction for settlement in one call.

use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context as _, anyhow};
use reqwest::Client;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::config::BraintreeEnvironment;
use crate::domain::repository::PaymentGateway;
use crate::domain::types::ChargeResult;
use crate::error::ApiError;

const SANDBOX_ENDPOINT: &str = "https://payments.sandbox.braintree-api.com/graphql";
const PRODUCTION_ENDPOINT: &str = "https://payments.braintree-api.com/graphql";
const BRAINTREE_VERSION: &str = "2019-01-01";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const CLIENT_TOKEN_MUTATION: &str = "mutation { createClientToken { clientToken } }";

const CHARGE_MUTATION: &str = "mutation Charge($input: ChargePaymentMethodInput!) { \
     chargePaymentMethod(input: $input) { \
     transaction { id status amount { value currencyCode } createdAt } } }";

/// Transaction statuses that mean the card was not charged.
const DECLINED_STATUSES: [&str; 4] = [
    "PROCESSOR_DECLINED",
    "GATEWAY_REJECTED",
    "FAILED",
    "SETTLEMENT_DECLINED",
];

/// Error classes caused by the submitted payment data rather than the gateway.
const DECLINE_ERROR_CLASSES: [&str; 2] = ["VALIDATION", "NOT_FOUND"];

impl BraintreeEnvironment {
    pub fn endpoint(self) -> &'static str {
        match self {
            Self::Sandbox => SANDBOX_ENDPOINT,
            Self::Production => PRODUCTION_ENDPOINT,
        }
    }
}

#[derive(Clone)]
pub struct BraintreeGateway {
    client: Client,
    endpoint: &'static str,
    merchant_id: Arc<str>,
    public_key: Arc<str>,
    private_key: Arc<str>,
}

impl BraintreeGateway {
    pub fn new(
        environment: BraintreeEnvironment,
        merchant_id: &str,
        public_key: &str,
        private_key: &str,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            client,
            endpoint: environment.endpoint(),
            merchant_id: merchant_id.into(),
            public_key: public_key.into(),
            private_key: private_key.into(),
        })
    }

    async fn execute(&self, body: Value) -> Result<Value, ApiError> {
        let response = self
            .client
            .post(self.endpoint)
            .basic_auth(&*self.public_key, Some(&*self.private_key))
            .header("Braintree-Version", BRAINTREE_VERSION)
            .json(&body)
            .send()
            .await
            .context("send braintree request")
            .map_err(ApiError::Gateway)?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Gateway(anyhow!(
                "braintree returned {status} for merchant {}",
                self.merchant_id
            )));
        }
        response
            .json::<Value>()
            .await
            .context("decode braintree response")
            .map_err(ApiError::Gateway)
    }
}

impl PaymentGateway for BraintreeGateway {
    async fn client_token(&self) -> Result<String, ApiError> {
        let response = self
            .execute(json!({ "query": CLIENT_TOKEN_MUTATION }))
            .await?;
        parse_client_token(response)
    }

    async fn charge(&self, nonce: &str, amount: Decimal) -> Result<ChargeResult, ApiError> {
        let body = json!({
            "query": CHARGE_MUTATION,
            "variables": {
                "input": {
                    "paymentMethodId": nonce,
                    "transaction": { "amount": format_amount(amount) },
                },
            },
        });
        let response = self.execute(body).await?;
        parse_charge(response, amount)
    }
}

/// Braintree expects a decimal string with two fraction digits.
pub(crate) fn format_amount(amount: Decimal) -> String {
    format!(
        "{:.2}",
        amount.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
    )
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: String,
    #[serde(default)]
    extensions: Option<GraphQlErrorExtensions>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GraphQlErrorExtensions {
    error_class: Option<String>,
}

fn graphql_errors(response: &Value) -> Vec<GraphQlError> {
    response
        .get("errors")
        .cloned()
        .and_then(|errors| serde_json::from_value(errors).ok())
        .unwrap_or_default()
}

fn joined_messages(errors: &[GraphQlError]) -> String {
    errors
        .iter()
        .map(|e| e.message.as_str())
        .collect::<Vec<_>>()
        .join("; ")
}

pub(crate) fn parse_client_token(response: Value) -> Result<String, ApiError> {
    let errors = graphql_errors(&response);
    if !errors.is_empty() {
        return Err(ApiError::Gateway(anyhow!(
            "createClientToken failed: {}",
            joined_messages(&errors)
        )));
    }
    response
        .pointer("/data/createClientToken/clientToken")
        .and_then(Value::as_str)
        .map(str::to_owned)
        .ok_or_else(|| ApiError::Gateway(anyhow!("createClientToken returned no token")))
}

pub(crate) fn parse_charge(response: Value, amount: Decimal) -> Result<ChargeResult, ApiError> {
    let errors = graphql_errors(&response);
    if !errors.is_empty() {
        let declined = errors.iter().all(|e| {
            e.extensions
                .as_ref()
                .and_then(|x| x.error_class.as_deref())
                .is_some_and(|class| DECLINE_ERROR_CLASSES.contains(&class))
        });
        let message = joined_messages(&errors);
        return Err(if declined {
            ApiError::PaymentDeclined(message)
        } else {
            ApiError::Gateway(anyhow!("chargePaymentMethod failed: {message}"))
        });
    }

    let transaction = response
        .pointer("/data/chargePaymentMethod/transaction")
        .filter(|t| t.is_object())
        .cloned()
        .ok_or_else(|| ApiError::Gateway(anyhow!("chargePaymentMethod returned no transaction")))?;
    let field = |name: &str| {
        transaction
            .get(name)
            .and_then(Value::as_str)
            .map(str::to_owned)
            .ok_or_else(|| ApiError::Gateway(anyhow!("transaction is missing `{name}`")))
    };
    let transaction_id = field("id")?;
    let status = field("status")?;
    if DECLINED_STATUSES.contains(&status.as_str()) {
        return Err(ApiError::PaymentDeclined(format!(
            "transaction {transaction_id} was {}",
            status.to_lowercase().replace('_', " ")
        )));
    }

    Ok(ChargeResult {
        transaction_id,
        status,
        amount,
        raw: transaction,
    })
}
