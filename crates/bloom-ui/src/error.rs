use thiserror::Error;

#[derive(Debug, Error)]
pub enum UiError {
    #[error("Display controller has stopped")]
    ControllerClosed,
}
