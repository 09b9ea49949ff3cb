pub mod plugin_disable;
pub mod plugin_enable;
pub mod service_register;
pub mod service_unregister;
