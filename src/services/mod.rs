// SPDX-License-Identifier: MIT
// Copyright 2026 SkinPilot Contributors

//! Backend service clients (OTP delivery, chat relay).

pub mod chat;
pub mod otp;

pub use chat::{ChatClient, ChatMessage, ChatReply, ChatThread, Sender};
pub use otp::{OtpClient, OtpDelivery};
