//! Command handler for the shell

use lrucache::SharedLruCache;
use serde::Serialize;
use tracing::{debug, warn};

use crate::parser::{parse_line, Command};
use crate::reply::Reply;

/// Cache size and counters, printed by `STATS` and `--json`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StatsReport {
    pub size: usize,
    pub capacity: usize,
    pub hits: u64,
    pub misses: u64,
    pub inserts: u64,
    pub updates: u64,
    pub evictions: u64,
    pub removals: u64,
    pub hit_ratio: f64,
}

impl StatsReport {
    fn render(&self) -> String {
        format!(
            "# Stats\n\
             cache_size:{}\n\
             cache_capacity:{}\n\
             cache_hits:{}\n\
             cache_misses:{}\n\
             cache_inserts:{}\n\
             cache_updates:{}\n\
             cache_evictions:{}\n\
             cache_removals:{}\n\
             cache_hit_ratio:{:.2}",
            self.size,
            self.capacity,
            self.hits,
            self.misses,
            self.inserts,
            self.updates,
            self.evictions,
            self.removals,
            self.hit_ratio,
        )
    }
}

pub struct CommandHandler {
    cache: SharedLruCache<String, String>,
}

impl CommandHandler {
    pub fn new(cache: SharedLruCache<String, String>) -> Self {
        Self { cache }
    }

    /// Parse and run one input line; `None` for blank lines and comments
    pub fn handle_line(&self, line: &str) -> Option<Reply> {
        match parse_line(line) {
            Ok(Some(cmd)) => Some(self.handle(cmd)),
            Ok(None) => None,
            Err(e) => {
                warn!("Parse error: {}", e);
                Some(Reply::Error(e.to_string()))
            }
        }
    }

    pub fn handle(&self, cmd: Command) -> Reply {
        debug!(?cmd, "executing");
        match cmd {
            Command::Put { key, value } => {
                self.cache.put(key, value);
                Reply::Ok
            }
            Command::Get(key) => Reply::Value(self.cache.get(key.as_str())),
            Command::Peek(key) => Reply::Value(self.cache.peek(key.as_str())),
            Command::Contains(key) => Reply::flag(self.cache.contains(key.as_str())),
            Command::Remove(key) => Reply::flag(self.cache.remove(key.as_str())),
            Command::Size => Reply::Integer(self.cache.len() as i64),
            Command::Clear => {
                self.cache.clear();
                Reply::Ok
            }
            Command::Keys => Reply::List(self.cache.keys()),
            Command::Oldest => match self.cache.peek_lru() {
                Some((key, value)) => Reply::List(vec![key, value]),
                None => Reply::Value(None),
            },
            Command::Stats => Reply::Text(self.report().render()),
        }
    }

    pub fn report(&self) -> StatsReport {
        let stats = self.cache.stats().snapshot();
        StatsReport {
            size: self.cache.len(),
            capacity: self.cache.capacity(),
            hits: stats.hits,
            misses: stats.misses,
            inserts: stats.inserts,
            updates: stats.updates,
            evictions: stats.evictions,
            removals: stats.removals,
            hit_ratio: stats.hit_ratio(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn handler(capacity: usize) -> CommandHandler {
        CommandHandler::new(SharedLruCache::new(capacity).unwrap())
    }

    fn run(handler: &CommandHandler, line: &str) -> Reply {
        handler.handle_line(line).unwrap()
    }

    #[test]
    fn test_put_and_get() {
        let handler = handler(4);

        assert_eq!(run(&handler, "PUT mykey my value"), Reply::Ok);
        assert_eq!(
            run(&handler, "GET mykey"),
            Reply::Value(Some("my value".to_string()))
        );
        assert_eq!(run(&handler, "GET other"), Reply::Value(None));
    }

    #[test]
    fn test_promotion_and_eviction() {
        let handler = handler(3);

        run(&handler, "PUT A 1");
        run(&handler, "PUT B 2");
        run(&handler, "PUT C 3");
        run(&handler, "GET A");
        run(&handler, "PUT D 4");

        assert_eq!(run(&handler, "CONTAINS B"), Reply::Integer(0));
        assert_eq!(
            run(&handler, "KEYS"),
            Reply::List(vec!["D".into(), "A".into(), "C".into()])
        );
        assert_eq!(
            run(&handler, "OLDEST"),
            Reply::List(vec!["C".into(), "3".into()])
        );
    }

    #[test]
    fn test_peek_does_not_promote() {
        let handler = handler(2);

        run(&handler, "PUT A 1");
        run(&handler, "PUT B 2");
        assert_eq!(run(&handler, "PEEK A"), Reply::Value(Some("1".into())));
        run(&handler, "PUT C 3");

        assert_eq!(run(&handler, "CONTAINS A"), Reply::Integer(0));
        assert_eq!(run(&handler, "CONTAINS B"), Reply::Integer(1));
    }

    #[test]
    fn test_remove_size_clear() {
        let handler = handler(4);

        run(&handler, "PUT a 1");
        run(&handler, "PUT b 2");
        assert_eq!(run(&handler, "REMOVE a"), Reply::Integer(1));
        assert_eq!(run(&handler, "REMOVE a"), Reply::Integer(0));
        assert_eq!(run(&handler, "SIZE"), Reply::Integer(1));

        assert_eq!(run(&handler, "CLEAR"), Reply::Ok);
        assert_eq!(run(&handler, "SIZE"), Reply::Integer(0));
        assert_eq!(run(&handler, "KEYS"), Reply::List(vec![]));
        assert_eq!(run(&handler, "OLDEST"), Reply::Value(None));
    }

    #[test]
    fn test_errors_do_not_stop_handler() {
        let handler = handler(2);

        assert!(matches!(run(&handler, "GET"), Reply::Error(_)));
        assert!(matches!(run(&handler, "BOGUS x"), Reply::Error(_)));
        assert_eq!(run(&handler, "PUT k v"), Reply::Ok);
        assert!(handler.handle_line("# comment").is_none());
    }

    #[test]
    fn test_stats_report() {
        let handler = handler(1);

        run(&handler, "PUT a 1");
        run(&handler, "PUT b 2");
        run(&handler, "GET b");
        run(&handler, "GET a");

        let report = handler.report();
        assert_eq!(report.size, 1);
        assert_eq!(report.capacity, 1);
        assert_eq!(report.hits, 1);
        assert_eq!(report.misses, 1);
        assert_eq!(report.evictions, 1);
        assert_eq!(report.hit_ratio, 0.5);

        let Reply::Text(text) = run(&handler, "STATS") else {
            panic!("STATS should render a text block");
        };
        assert!(text.starts_with("# Stats\n"));
        assert!(text.contains("cache_evictions:1"));
        assert!(text.contains("cache_hit_ratio:0.50"));
    }
}
