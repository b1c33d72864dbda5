// Services module for business logic
pub mod binary_locator;
pub mod orchestrator;
pub mod template_processor;
