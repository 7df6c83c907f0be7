//! 可取消的网络任务
//!
//! 界面发起的每个网络操作都包在 `Abortable` 里，由界面持有 `TaskGuard`。
//! 界面卸载时 guard 被 drop，任务在下一个挂起点终止，过期响应不会再写入会话。

use futures::future::{AbortHandle, Abortable, Aborted};
use std::future::Future;

/// 任务守卫，drop 时取消对应任务
#[derive(Debug)]
pub struct TaskGuard {
    handle: AbortHandle,
}

impl Drop for TaskGuard {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// 把 future 包装为可取消任务
pub fn cancellable<F: Future>(fut: F) -> (Abortable<F>, TaskGuard) {
    let (handle, registration) = AbortHandle::new_pair();
    (Abortable::new(fut, registration), TaskGuard { handle })
}

/// 任务被取消时记录日志，便于排查
pub fn log_if_cancelled<T>(operation: &str, result: Result<T, Aborted>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(Aborted) => {
            log::debug!("{} cancelled before completion", operation);
            None
        }
    }
}
