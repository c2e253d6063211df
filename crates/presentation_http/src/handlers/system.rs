//! Informational handlers

/// Root banner
pub async fn banner() -> &'static str {
    "KidGuard moderation relay running! POST to /moderate"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn banner_names_the_endpoint() {
        let text = banner().await;
        assert!(text.contains("/moderate"));
    }
}
