use crate::chat::{ChatError, ChatReply, ReplyResolver};
use crate::logger;
use std::sync::Arc;
use std::sync::mpsc::{Receiver, Sender};
use std::thread;

#[derive(Debug)]
pub enum ChatRequest {
    Send { text: String },
}

#[derive(Debug)]
pub enum ChatResponse {
    Reply(ChatReply),
}

/// Runs round trips off the UI thread, one at a time, in arrival order.
pub fn spawn_chat_worker(
    resolver: Arc<ReplyResolver>,
    reply_tx: Sender<ChatResponse>,
    request_rx: Receiver<ChatRequest>,
) -> std::io::Result<thread::JoinHandle<()>> {
    thread::Builder::new()
        .name("lexafrica-prep::chat_worker".to_string())
        .spawn(move || {
            let rt = match tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
            {
                Ok(rt) => rt,
                Err(e) => {
                    logger::log(&format!("Chat worker could not start a runtime: {}", e));
                    return;
                }
            };

            while let Ok(ChatRequest::Send { text }) = request_rx.recv() {
                logger::log("Chat worker received request");
                let reply = rt.block_on(resolver.resolve(&text));
                logger::log(&format!("Chat worker replying via {:?}", reply.source));
                if reply_tx.send(ChatResponse::Reply(reply)).is_err() {
                    break;
                }
            }

            logger::log("Chat worker channel disconnected, exiting");
        })
}

/// Reply used when the worker is gone, so the widget never stays busy.
pub fn worker_unavailable_reply() -> ChatReply {
    ChatReply::diagnostic(&ChatError::Provider("chat worker unavailable".to_string()))
}
