use crate::event::KeyboardEvent;

/// The trait for input devices.
///
/// An input device keeps sampling its hardware and resolves once it has an event for the upper
/// layers.
///
/// ```rust,ignore
/// loop {
///     let event = matrix.read_event().await?;
///     process(event).await;
/// }
/// ```
pub trait InputDevice {
    type Error;

    /// Read the next input event
    async fn read_event(&mut self) -> Result<KeyboardEvent, Self::Error>;
}
