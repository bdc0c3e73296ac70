//! Provider auto-detection and parser registry.

use dnsweeper_core::{ParseResult, Provider};
use tracing::debug;

use crate::provider::{CloudflareParser, GenericParser, Route53Parser, RowParser};
use crate::table::Table;

/// Registered parsers in detection priority order.
///
/// The last entry is the catch-all used when no schema matches.
pub struct ParserRegistry {
    parsers: Vec<Box<dyn RowParser>>,
}

impl Default for ParserRegistry {
    fn default() -> Self {
        Self {
            parsers: vec![
                Box::new(CloudflareParser),
                Box::new(Route53Parser),
                Box::new(GenericParser),
            ],
        }
    }
}

impl std::fmt::Debug for ParserRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_list()
            .entries(self.parsers.iter().map(|p| p.provider()))
            .finish()
    }
}

impl ParserRegistry {
    /// Registry with the built-in providers
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Providers in priority order
    pub fn providers(&self) -> impl Iterator<Item = Provider> + '_ {
        self.parsers.iter().map(|p| p.provider())
    }

    /// Parser registered for `provider`
    #[must_use]
    pub fn get(&self, provider: Provider) -> Option<&dyn RowParser> {
        self.parsers
            .iter()
            .find(|p| p.provider() == provider)
            .map(|p| &**p)
    }

    /// Pick the provider whose required columns all appear in `headers`.
    ///
    /// Falls back to [`Provider::Generic`] when nothing matches; the generic
    /// parser then reports per-row missing fields.
    #[must_use]
    pub fn detect(&self, headers: &[String]) -> Provider {
        let detected = self
            .parsers
            .iter()
            .find(|p| p.matches(headers))
            .map_or(Provider::Generic, |p| p.provider());
        debug!(provider = detected.as_str(), ?headers, "provider detected");
        detected
    }

    /// Parse with an explicit provider, or auto-detect when `None`.
    #[must_use]
    pub fn parse(&self, table: &Table, provider: Option<Provider>) -> ParseResult {
        let provider = provider.unwrap_or_else(|| self.detect(table.headers()));
        match self.get(provider) {
            Some(parser) => parser.parse(table),
            None => GenericParser.parse(table),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| (*s).to_string()).collect()
    }

    #[test]
    fn detects_each_provider() {
        let registry = ParserRegistry::new();
        assert_eq!(
            registry.detect(&headers(&["name", "type", "content", "ttl", "proxied"])),
            Provider::Cloudflare
        );
        assert_eq!(
            registry.detect(&headers(&["name", "type", "value", "ttl", "weight"])),
            Provider::Route53
        );
        assert_eq!(
            registry.detect(&headers(&["domain", "record_type", "value"])),
            Provider::Generic
        );
    }

    #[test]
    fn cloudflare_wins_over_route53_when_both_match() {
        let registry = ParserRegistry::new();
        let both = headers(&["name", "type", "content", "value"]);
        assert_eq!(registry.detect(&both), Provider::Cloudflare);
    }

    #[test]
    fn unknown_headers_fall_back_to_generic() {
        let registry = ParserRegistry::new();
        let table = Table::new(["host", "kind", "data"], vec![vec!["example.com", "A", "192.0.2.1"]]);
        assert_eq!(registry.detect(table.headers()), Provider::Generic);

        let result = registry.parse(&table, None);
        assert_eq!(result.meta.provider, Provider::Generic);
        assert!(result.records.is_empty());
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn explicit_provider_bypasses_detection() {
        let registry = ParserRegistry::new();
        let table = Table::new(
            ["name", "type", "content"],
            vec![vec!["example.com", "A", "192.0.2.1"]],
        );
        let result = registry.parse(&table, Some(Provider::Route53));
        assert_eq!(result.meta.provider, Provider::Route53);
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn providers_in_priority_order() {
        let order: Vec<Provider> = ParserRegistry::new().providers().collect();
        assert_eq!(order, Provider::ALL.to_vec());
    }
}
