mod shell;
pub use shell::Shell;

mod login;
pub use login::Login;

mod register;
pub use register::Register;

mod links;
pub use links::Links;

mod documents;
pub use documents::Documents;

mod memos;
pub use memos::Memos;

mod account;
pub use account::Account;

/// Client-side redirect, used after auth state changes where the router's
/// navigator is not in scope.
pub(crate) fn redirect_to(path: &str) {
    #[cfg(target_arch = "wasm32")]
    {
        if let Some(window) = web_sys::window() {
            let _ = window.location().set_href(path);
        }
    }
    #[cfg(not(target_arch = "wasm32"))]
    {
        let _ = path;
    }
}
