mod escalation_discovery;
mod fidelity_filter;
mod traversal_session;

pub use escalation_discovery::EscalationDiscovery;
pub use fidelity_filter::FidelityFilter;
pub use traversal_session::TraversalSession;
