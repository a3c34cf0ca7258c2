//! Billing methods (payment cards attached to a team).

use serde::{Deserialize, Serialize};
use serde_with::skip_serializing_none;

use crate::client::CycleClient;
use crate::error::Result;
use crate::models::common::{Events, State};
use crate::response::ApiResponse;
use crate::task::{TaskAction, TaskDocument};
use crate::traits::{Create, Delete, Get, List, ResourceType, Tasks, Update};

/// The `billing_methods` resource kind.
#[derive(Debug, Clone, Copy)]
pub struct BillingMethods;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingMethodAttributes {
    pub name: String,
    #[serde(default)]
    pub primary: bool,
    #[serde(default)]
    pub address: Option<BillingAddress>,
    #[serde(default)]
    pub credit_card: Option<CreditCard>,
    pub state: State<BillingMethodState>,
    #[serde(default)]
    pub events: Events,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingMethodState {
    Active,
    Inactive,
    Processing,
    Deleting,
    Deleted,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BillingAddress {
    pub city: String,
    pub country: String,
    pub state: String,
    pub zip: String,
    pub lines: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expiration {
    pub month: u8,
    pub year: u16,
}

/// Card details as returned by the API (no number).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCard {
    pub name: String,
    pub brand: String,
    pub expiration: Expiration,
}

/// Card details submitted when adding a method.
#[derive(Clone, Serialize)]
pub struct CreditCardParams {
    pub name: String,
    pub number: String,
    pub cvv2: String,
    pub expiration: Expiration,
}

impl std::fmt::Debug for CreditCardParams {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CreditCardParams")
            .field("name", &self.name)
            .field("expiration", &self.expiration)
            .finish_non_exhaustive()
    }
}

/// Parameters for adding a billing method.
#[skip_serializing_none]
#[derive(Debug, Clone, Serialize)]
pub struct NewBillingMethod {
    pub name: String,
    pub credit_card: CreditCardParams,
    pub address: BillingAddress,
    pub team: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct UpdateBillingMethod {
    pub name: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BillingMethodAction {
    MakePrimary,
}

impl TaskAction for BillingMethodAction {
    fn as_str(&self) -> &'static str {
        match self {
            BillingMethodAction::MakePrimary => "make_primary",
        }
    }
}

impl ResourceType for BillingMethods {
    const TYPE: &'static str = "billing_methods";
    const PATH: &'static str = "billing/methods";
    type Attributes = BillingMethodAttributes;
}

impl List for BillingMethods {}

impl Get for BillingMethods {}

impl Create for BillingMethods {
    type Params = NewBillingMethod;
}

impl Update for BillingMethods {
    type Params = UpdateBillingMethod;
}

impl Delete for BillingMethods {}

impl Tasks for BillingMethods {
    type Action = BillingMethodAction;
}

impl BillingMethods {
    /// Make this the team's primary payment method.
    #[tracing::instrument(skip(client))]
    pub async fn make_primary(client: &CycleClient, id: &str) -> Result<ApiResponse<TaskDocument>> {
        Self::perform(client, id, BillingMethodAction::MakePrimary).await
    }
}
