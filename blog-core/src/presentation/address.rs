/// Адрес отрисовываемой страницы в том виде, в каком его видит браузер.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageAddress {
    href: String,
}

impl PageAddress {
    pub fn new(href: impl Into<String>) -> Self {
        Self { href: href.into() }
    }

    pub fn href(&self) -> &str {
        &self.href
    }

    /// Первое значение параметра `name` из query-строки.
    ///
    /// Декодирование как у `application/x-www-form-urlencoded`: `+` это пробел,
    /// битые UTF-8 последовательности заменяются, а не отбрасываются.
    pub fn query_param(&self, name: &str) -> Option<String> {
        let (_, rest) = self.href.split_once('?')?;
        let query = rest.split('#').next().unwrap_or_default();

        form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Id поста из адреса. Пустое или пробельное значение считается отсутствующим,
    /// непустое возвращается как есть.
    pub fn post_id(&self) -> Option<String> {
        self.query_param("id").filter(|id| !id.trim().is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_id_reads_id_parameter() {
        let address = PageAddress::new("https://growtez.com/blog-post.html?id=abc123");
        assert_eq!(address.post_id().as_deref(), Some("abc123"));
    }

    #[test]
    fn query_param_decodes_and_ignores_fragment() {
        let address = PageAddress::new("/blog-post.html?ref=home&id=a%2Fb+c#comments");
        assert_eq!(address.query_param("id").as_deref(), Some("a/b c"));
        assert_eq!(address.query_param("ref").as_deref(), Some("home"));
    }

    #[test]
    fn post_id_is_absent_without_query_or_when_blank() {
        assert!(PageAddress::new("https://growtez.com/blog-post.html").post_id().is_none());
        assert!(PageAddress::new("/blog-post.html?id=").post_id().is_none());
        assert!(PageAddress::new("/blog-post.html?id=%20%20").post_id().is_none());
        assert!(PageAddress::new("/blog-post.html?other=1").post_id().is_none());
    }

    #[test]
    fn post_id_keeps_surrounding_whitespace() {
        let address = PageAddress::new("/blog-post.html?id=+abc+");
        assert_eq!(address.post_id().as_deref(), Some(" abc "));
    }

    #[test]
    fn query_param_decodes_invalid_utf8_lossily() {
        let address = PageAddress::new("/blog-post.html?id=a%FFb");
        assert_eq!(address.post_id().as_deref(), Some("a\u{FFFD}b"));
    }

    #[test]
    fn query_param_returns_first_occurrence() {
        let address = PageAddress::new("/p?id=first&id=second");
        assert_eq!(address.query_param("id").as_deref(), Some("first"));
    }
}
