// Data types shared across the provisioning workflow.

// Optional `setup-venv.yaml` project configuration.
pub mod config;
// Version spec, tool variant, installer choice and probe outcome.
pub mod environment;
