//! Image storage.
//!
//! The agent never fetches the images itself; their public URLs are embedded
//! as plain text in the prompt, so the store must hand back a durable,
//! publicly fetchable URL before the agent loop starts.

mod drive;

pub use drive::{GoogleDriveStore, ServiceAccountKey};

use async_trait::async_trait;
use bytes::Bytes;
use chrono::{DateTime, Local, Timelike};

/// Durable, publicly readable blob storage.
#[async_trait]
pub trait ImageStore: Send + Sync {
    /// Store the bytes under the given filename and return a public URL.
    async fn store(&self, data: Bytes, filename: &str, mime_type: &str)
        -> anyhow::Result<String>;
}

/// Build the upload filename: `{user}_{dd-mm-yyyy}_{h-mm}{am|pm}_{original}`,
/// with whitespace in the user's name collapsed to underscores.
pub fn format_filename(original_name: &str, user_name: &str, now: DateTime<Local>) -> String {
    let date = now.format("%d-%m-%Y");

    let hour24 = now.hour();
    let ampm = if hour24 >= 12 { "pm" } else { "am" };
    let hour12 = match hour24 % 12 {
        0 => 12,
        h => h,
    };
    let time = format!("{}-{:02}{}", hour12, now.minute(), ampm);

    let clean_user_name = user_name.split_whitespace().collect::<Vec<_>>().join("_");
    format!("{}_{}_{}_{}", clean_user_name, date, time, original_name)
}
