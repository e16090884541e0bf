pub mod component_source;
pub mod discovery;
pub mod routes;
pub mod template_loader;
