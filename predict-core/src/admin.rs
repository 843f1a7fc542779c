//! Admin API contracts for node, wallet and venue account configuration

use crate::platform::Platform;
use crate::market::MarketSide;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! binary_status {
    ($(#[$meta:meta])* $name:ident, $off:ident, $on:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
        #[serde(try_from = "i32", into = "i32")]
        pub enum $name {
            #[default]
            $off,
            $on,
        }

        impl From<$name> for i32 {
            fn from(status: $name) -> i32 {
                match status {
                    $name::$off => 0,
                    $name::$on => 1,
                }
            }
        }

        impl TryFrom<i32> for $name {
            type Error = String;

            fn try_from(value: i32) -> Result<Self, Self::Error> {
                match value {
                    0 => Ok($name::$off),
                    1 => Ok($name::$on),
                    other => Err(format!("invalid {} value: {}", stringify!($name), other)),
                }
            }
        }
    };
}

binary_status!(
    /// Node status (0 disabled, 1 enabled)
    NodeStatus, Disabled, Enabled
);
binary_status!(
    /// Wallet status (0 disabled, 1 enabled)
    WalletStatus, Disabled, Enabled
);
binary_status!(
    /// Venue account status (0 inactive, 1 active)
    MarketConfigStatus, Inactive, Active
);

/// A blockchain node configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    pub id: i64,
    pub chain_type: String,
    pub url: String,
    pub chain_id: i64,
    pub chain_decimals: u32,
    pub status: NodeStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A platform wallet configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Wallet {
    pub id: i64,
    pub chain_type: String,
    pub chain_id: i64,
    pub wallet_address: String,
    pub status: WalletStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// A venue trading account configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketConfig {
    pub id: String,
    pub market_type: Platform,
    pub market_side: MarketSide,
    pub api_key: String,
    pub platform_address: String,
    pub wallet_address: String,
    pub is_active: MarketConfigStatus,
    pub base_url: String,
    pub chain_id: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl MarketConfig {
    pub fn is_active(&self) -> bool {
        self.is_active == MarketConfigStatus::Active
    }
}
