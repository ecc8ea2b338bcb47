//! Autonomous cell behaviour.

mod bot;

pub use bot::{random_heading, think, AiSteering, BotIntent};
