pub async fn check() -> &'static str {
    "OK"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn health_is_ok() {
        assert_eq!(tokio_test::block_on(check()), "OK");
    }
}
