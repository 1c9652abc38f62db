/// Adapters layer - Infrastructure implementations
///
/// This layer contains concrete implementations of the ports,
/// providing the actual integration with fixture servers, the
/// filesystem and the terminal.
pub mod outbound;
