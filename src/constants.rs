//! # Constants
//!
//! Wire-format constants shared by the translation and manifest modules.
//!
//! These values are fixed by the target cluster's expectations; changing any
//! of them changes the emitted manifests.

/// API group/version of the produced OAuth resource
pub const API_VERSION: &str = "config.openshift.io/v1";

/// Kind of the produced cluster authentication resource
pub const OAUTH_KIND: &str = "OAuth";

/// Fixed name of the cluster-scoped OAuth resource
pub const OAUTH_RESOURCE_NAME: &str = "cluster";

/// Namespace the companion Secret and ConfigMap manifests live in
pub const OAUTH_NAMESPACE: &str = "openshift-config";

/// Prefix shared by every generated manifest file name
pub const MANIFEST_PREFIX: &str = "AuthMig-cluster";

/// Directory created under the output directory for the manifest files
pub const MANIFESTS_DIR: &str = "manifests";

/// Conventional location of the legacy master configuration on a control
/// plane host
pub const DEFAULT_MASTER_CONFIG_PATH: &str = "/etc/origin/master/master-config.yaml";
