use proc_macro::TokenStream;
use quote::quote;
use syn::{parse_macro_input, Attribute, ItemFn, LitInt};

/// Wraps a test in a wall-clock deadline so a wedged async task fails the
/// test instead of hanging the whole suite. Replaces `#[test]` and
/// `#[tokio::test]`; async bodies get a current-thread runtime.
///
/// ```ignore
/// #[test_deadline::deadline]
/// async fn pushes_arrive() { /* ... */ }
///
/// #[test_deadline::deadline(5)]
/// fn parses_quickly() { /* ... */ }
/// ```
#[proc_macro_attribute]
pub fn deadline(attr: TokenStream, item: TokenStream) -> TokenStream {
    let mut limit_secs: u64 = 30;

    if !attr.is_empty() {
        let lit = parse_macro_input!(attr as LitInt);
        limit_secs = lit
            .base10_parse()
            .unwrap_or_else(|err| panic!("invalid deadline: {err}"));
        if limit_secs == 0 {
            panic!("deadline must be greater than zero");
        }
    }

    let ItemFn {
        attrs,
        vis,
        mut sig,
        block,
    } = parse_macro_input!(item as ItemFn);

    let is_async = sig.asyncness.take().is_some();

    let kept_attrs: Vec<Attribute> = attrs
        .into_iter()
        .filter(|attr| !is_harness_attribute(attr))
        .collect();

    let body = if is_async {
        quote! {
            let runtime = tokio::runtime::Builder::new_current_thread()
                .enable_all()
                .build()
                .expect("failed to build tokio runtime");
            runtime.block_on(async {
                tokio::time::timeout(limit, async move #block)
                    .await
                    .expect("test exceeded deadline");
            });
        }
    } else {
        quote! { #block }
    };

    TokenStream::from(quote! {
        #[test]
        #(#kept_attrs)*
        #vis #sig {
            let limit = std::time::Duration::from_secs(#limit_secs);
            let (done_tx, done_rx) = std::sync::mpsc::channel();
            std::thread::spawn(move || {
                let outcome = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
                    #body
                }));
                let _ = done_tx.send(outcome);
            });
            match done_rx.recv_timeout(limit) {
                Ok(Ok(())) => {}
                Ok(Err(payload)) => std::panic::resume_unwind(payload),
                Err(std::sync::mpsc::RecvTimeoutError::Timeout) => {
                    panic!("test exceeded deadline")
                }
                Err(std::sync::mpsc::RecvTimeoutError::Disconnected) => {
                    panic!("test worker exited without reporting a result")
                }
            }
        }
    })
}

fn is_harness_attribute(attr: &Attribute) -> bool {
    let path = attr.path();
    if path.is_ident("test") {
        return true;
    }
    let mut segments = path.segments.iter();
    matches!(
        (segments.next(), segments.next(), segments.next()),
        (Some(first), Some(second), None)
            if first.ident == "tokio" && second.ident == "test"
    )
}
