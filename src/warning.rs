//! Per-post warning collection.
//!
//! Assembling a post can notice things worth telling the author about (a
//! defaulted title, an unreadable frontmatter line) without failing. Those
//! notes are collected in a task-local list so the loader can attach them to
//! the post that produced them.

use std::cell::RefCell;

tokio::task_local! {
    static WARNINGS: RefCell<Vec<String>>;
}

/// Record a warning for the post currently being loaded.
/// Outside of [`collect_warnings`] the warning is dropped.
pub fn collect(message: impl Into<String>) {
    let _ = WARNINGS.try_with(|warnings| {
        warnings.borrow_mut().push(message.into());
    });
}

/// Run `f` with warning collection enabled and return what it collected.
pub async fn collect_warnings<F, T>(f: F) -> (T, Vec<String>)
where
    F: std::future::Future<Output = T>,
{
    WARNINGS
        .scope(RefCell::new(Vec::new()), async {
            let result = f.await;
            let warnings = WARNINGS.with(|w| std::mem::take(&mut *w.borrow_mut()));
            (result, warnings)
        })
        .await
}

#[macro_export]
macro_rules! warn_entry {
    ($($arg:tt)*) => {
        $crate::warning::collect(format!($($arg)*))
    };
}
