//! # Artifacts
//!
//! Retrieval and in-memory loading of the pre-trained model artifacts the
//! inference slice depends on: the serialized regressor, the ordered
//! feature-column schema, and the location target-encoding table.
//!
//! Artifacts are opaque, externally produced blobs. On cold start they are
//! fetched from a durable store into a local cache (skipping blobs already
//! present) and deserialized once into an immutable [`ArtifactBundle`] that
//! is shared by reference for the process lifetime.
//!
//! ## Example
//!
//! ```no_run
//! use homeval_artifacts::{ArtifactBundle, DirArtifactStore};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), homeval_artifacts::ArtifactError> {
//!     let bundle = ArtifactBundle::builder()
//!         .store(Box::new(DirArtifactStore::new("/srv/models")))
//!         .cache_dir("/tmp/homeval-artifacts")
//!         .load()
//!         .await?;
//!
//!     let features = vec![0.0; bundle.columns().len()];
//!     let prediction = bundle.model().predict(&features)?;
//!     println!("{prediction}");
//!     Ok(())
//! }
//! ```

mod bundle;
mod error;
mod model;
mod schema;
mod store;

pub use crate::bundle::{ArtifactBundle, ArtifactBundleBuilder};
pub use crate::error::ArtifactError;
pub use crate::model::{LinearModel, Regressor};
pub use crate::schema::{ColumnSchema, DEFAULT_UNSEEN_ENCODING, LocationEncoding};
pub use crate::store::{ArtifactStore, DirArtifactStore, HttpArtifactStore, from_config};
