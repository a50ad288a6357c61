//! Instance-listing endpoint (`GET <base>/instance/fetchInstances`).

use serde::{Deserialize, Serialize};

/// Path of the instance-listing endpoint, relative to the base URL.
pub const FETCH_INSTANCES_PATH: &str = "/instance/fetchInstances";

/// One element of the instance-listing response.
///
/// `id` and `token` are required for the record to be usable; display
/// fields default to empty strings when the server omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstanceRecord {
	pub id: String,
	#[serde(default)]
	pub name: String,
	pub token: String,
	#[serde(default)]
	pub connection_status: String,
}
