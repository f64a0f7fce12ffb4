//! Well-known names and default values.

/// Role link substituted for security-role references that declare none.
pub const DEFAULT_SECURITY_ROLE: &str = "openejb.default.security.role";

/// Listener interface assumed for message-driven beans without a messaging type.
pub const DEFAULT_LISTENER_INTERFACE: &str = "javax.jms.MessageListener";

/// Activation property that receives a message-driven bean's destination type.
pub const DESTINATION_TYPE_PROPERTY: &str = "destinationType";

/// Transaction type recorded for container-managed transactions.
pub const CONTAINER_TRANSACTION_TYPE: &str = "Container";

/// System property naming the active module loader.
pub const LOADER_PROPERTY: &str = "openejb.loader";

/// Loader mode for which classpath registration of the module is skipped.
pub const SKIPPED_LOADER_MODE: &str = "tomcat-webapp";

/// Archive extension stripped from a module path to derive its module id.
pub const MODULE_ARCHIVE_EXTENSION: &str = ".jar";

/// Default CMP engine factory for container-managed entity containers.
pub const DEFAULT_CMP_ENGINE_FACTORY: &str = "org.apache.openejb.core.cmp.jpa.JpaCmpEngineFactory";

/// Application name used in CLI output.
pub const APP_NAME: &str = "beanlink";
