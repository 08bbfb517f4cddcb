pub mod board_service;

pub use board_service::{BoardService, ChannelError};
