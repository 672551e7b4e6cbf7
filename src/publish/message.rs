use chrono::Local;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Format of `dc_batch_time` and `dc_time`
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Record category, carried in the envelope's `dc_name`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    StationList,
    StationDetail,
}

impl Category {
    pub fn dc_name(&self) -> &'static str {
        match self {
            Self::StationList => "chocolateswap_station_list",
            Self::StationDetail => "chocolateswap_station_detail",
        }
    }

    pub fn from_dc_name(name: &str) -> Option<Self> {
        match name {
            "chocolateswap_station_list" => Some(Self::StationList),
            "chocolateswap_station_detail" => Some(Self::StationDetail),
            _ => None,
        }
    }
}

/// Uniform envelope for every record sent to the topic
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutboundMessage {
    pub domain_name: String,
    pub dc_name: String,
    /// Always empty
    pub meta_json: String,
    pub data_json: Value,
    /// Always empty
    pub data_html: String,
    /// Fixed for the lifetime of the publisher
    pub dc_batch_time: String,
    /// Stamped when the envelope is built
    pub dc_time: String,
}

impl OutboundMessage {
    pub fn new(domain_name: &str, category: Category, data_json: Value, batch_time: &str) -> Self {
        Self {
            domain_name: domain_name.to_string(),
            dc_name: category.dc_name().to_string(),
            meta_json: String::new(),
            data_json,
            data_html: String::new(),
            dc_batch_time: batch_time.to_string(),
            dc_time: now_timestamp(),
        }
    }

    pub fn category(&self) -> Option<Category> {
        Category::from_dc_name(&self.dc_name)
    }

    /// UTF-8 JSON encoding; non-ASCII text is written as-is
    pub fn to_bytes(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec(self)
    }
}

pub(crate) fn now_timestamp() -> String {
    Local::now().format(TIMESTAMP_FORMAT).to_string()
}
