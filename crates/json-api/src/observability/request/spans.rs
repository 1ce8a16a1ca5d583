//! Route labels for spans and metrics.

/// Collapses numeric path segments so `/api/small/cart/17` is labelled `/api/small/cart/{id}`.
pub(super) fn route_label(path: &str) -> String {
    if path == "/" {
        return "/".to_owned();
    }

    let mut label = String::from("/");

    for (index, segment) in path.trim_start_matches('/').split('/').enumerate() {
        if index > 0 {
            label.push('/');
        }

        if !segment.is_empty() && segment.bytes().all(|byte| byte.is_ascii_digit()) {
            label.push_str("{id}");
        } else {
            label.push_str(segment);
        }
    }

    label
}
