use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::errors::OrderError;

// ============================================================================
// Order Value Objects
// ============================================================================

/// Opaque order identity, assigned by the store on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OrderId(pub i64);

/// Identity of one line item within an order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ItemId(pub i64);

/// Catalog product reference. The order engine only ever copies its price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProductId(pub i64);

/// Customer reference, validated against the client directory on creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ClientId(pub i64);

/// Restaurant (tenant) reference. All order data is scoped per tenant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TenantId(pub i64);

macro_rules! display_as_inner {
    ($($id:ident),*) => {
        $(impl std::fmt::Display for $id {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                write!(f, "{}", self.0)
            }
        })*
    };
}

display_as_inner!(OrderId, ItemId, ProductId, ClientId, TenantId);

/// Dine-in service charge defaults to 10% when the caller does not override it.
pub const DEFAULT_SERVICE_CHARGE_PERCENT: Decimal = dec!(10);

/// Order kind as a tagged union: each variant carries only the fee fields that
/// apply to it, so a pickup order cannot hold a stray service-charge percent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data")]
pub enum OrderKind {
    Pickup,
    Delivery { delivery_fee: Decimal },
    DineIn { service_charge_percent: Decimal },
}

impl OrderKind {
    /// Dine-in with an optional service-charge override (0–100).
    pub fn dine_in(service_charge_percent: Option<Decimal>) -> Result<Self, OrderError> {
        let pct = service_charge_percent.unwrap_or(DEFAULT_SERVICE_CHARGE_PERCENT);
        if pct < Decimal::ZERO || pct > dec!(100) {
            return Err(OrderError::InvalidServiceChargePercent(pct));
        }
        Ok(Self::DineIn { service_charge_percent: pct })
    }

    /// Delivery with an optional fee; absent means no charge.
    pub fn delivery(delivery_fee: Option<Decimal>) -> Result<Self, OrderError> {
        let fee = delivery_fee.unwrap_or(Decimal::ZERO);
        if fee < Decimal::ZERO {
            return Err(OrderError::NegativeDeliveryFee(fee));
        }
        Ok(Self::Delivery { delivery_fee: fee })
    }

    pub const fn pickup() -> Self {
        Self::Pickup
    }

    pub const fn tag(&self) -> OrderKindTag {
        match self {
            Self::Pickup => OrderKindTag::Pickup,
            Self::Delivery { .. } => OrderKindTag::Delivery,
            Self::DineIn { .. } => OrderKindTag::DineIn,
        }
    }
}

/// Field-free discriminant of [`OrderKind`], used by the kind-filter query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderKindTag {
    Pickup,
    Delivery,
    DineIn,
}

/// Order lifecycle status.
///
/// `Open → Preparing → Ready → Delivered` is the kitchen flow; `Closed` is
/// reached through close-account (dine-in) and `Cancelled` from any
/// non-terminal state. `Delivered`, `Closed` and `Cancelled` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderStatus {
    Open,
    Preparing,
    Ready,
    Delivered,
    Closed,
    Cancelled,
}

impl OrderStatus {
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Delivered | Self::Closed | Self::Cancelled)
    }

    /// Next step in the kitchen flow, if any.
    pub const fn next_in_flow(self) -> Option<Self> {
        match self {
            Self::Open => Some(Self::Preparing),
            Self::Preparing => Some(Self::Ready),
            Self::Ready => Some(Self::Delivered),
            Self::Delivered | Self::Closed | Self::Cancelled => None,
        }
    }
}

/// One product line within an order.
///
/// `unit_price` is a snapshot taken from the catalog when the item was added;
/// later catalog price changes never touch it. The line subtotal is always
/// derived, never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub id: ItemId,
    pub product_id: ProductId,
    pub quantity: i32,
    pub unit_price: Decimal,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl OrderItem {
    pub fn line_total(&self) -> Decimal {
        Decimal::from(self.quantity) * self.unit_price
    }
}

/// Derived money fields of an order. `total` always equals
/// `subtotal + service_charge + delivery_fee` exactly.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OrderTotals {
    pub subtotal: Decimal,
    pub service_charge: Decimal,
    pub delivery_fee: Decimal,
    pub total: Decimal,
}

impl OrderTotals {
    pub const ZERO: Self = Self {
        subtotal: Decimal::ZERO,
        service_charge: Decimal::ZERO,
        delivery_fee: Decimal::ZERO,
        total: Decimal::ZERO,
    };
}

// ============================================================================
// Unit Tests
// ============================================================================
