//! Fills the create-user form, submits it and prints the rendered record.
//!
//! Uploads go to the storage endpoint named by `FORMKIT_STORAGE_URL` and
//! `FORMKIT_STORAGE_KEY` when both are set, and to memory otherwise.
//!
//! ```text
//! cargo run -p formkit-form --example signup
//! ```

use std::sync::Arc;

use formkit_form::signup::{self, TechEntry};
use formkit_form::{FileHandle, FormError, FormState, SubmitHandler};
use formkit_storage::{HttpObjectStore, MemoryObjectStore, ObjectStore, StorageConfig};
use tracing::{info, warn};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let _guard = formkit_log::init_with(formkit_log::Config::development())?;

    let (store, bucket): (Arc<dyn ObjectStore>, String) = match StorageConfig::from_env() {
        Ok(config) => {
            let bucket = config.bucket.clone();
            (Arc::new(HttpObjectStore::new(config)?), bucket)
        }
        Err(error) => {
            info!(%error, "no storage configured, keeping uploads in memory");
            (Arc::new(MemoryObjectStore::new()), "avatars".to_string())
        }
    };
    let handler = SubmitHandler::new(store, bucket);

    let mut form = FormState::new(signup::signup_schema());
    form.set_value("avatar", FileHandle::new("ana.png", "image/png", vec![0x89_u8, b'P', b'N', b'G']))?;
    form.set_value("name", "ana silva")?;
    form.set_value("email", "ana@yahoo.com")?;
    form.set_value("password", "123456")?;
    form.append_entry("techs", TechEntry::new("go", 80).to_raw())?;
    form.append_entry("techs", TechEntry::new("ts", 40).to_raw())?;

    match form.submit(&handler).await {
        Err(FormError::Invalid(errors)) => {
            println!("{}", serde_json::to_string_pretty(&errors)?);
        }
        other => {
            other?;
        }
    }

    form.set_value("email", "ana@gmail.com")?;
    let outcome = form.submit(&handler).await?;
    for failure in outcome.failures() {
        warn!(field = %failure.field, key = %failure.key, "avatar was not stored");
    }
    println!("{}", outcome.output());

    Ok(())
}
