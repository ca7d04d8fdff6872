use crate::model::Category;

/// Keywords per category, matched as case-insensitive substrings.
///
/// Keep entries lowercase. Short keywords are avoided where they occur
/// inside common words ("orm" in "performance", "test" in "latest"), and a
/// keyword must not be contained in another category's keyword
/// ("injection" in "dependency injection").
const KEYWORDS: &[(Category, &[&str])] = &[
    (
        Category::Security,
        &[
            "sql injection",
            "command injection",
            "header injection",
            "code injection",
            "csrf",
            "xss",
            "cross-site",
            "password",
            "hashing",
            "authentication",
            "authorization",
            "sanitiz",
            "escaping",
            "prepared statement",
            "vulnerab",
            "security",
            "secure",
            "session fixation",
            "encrypt",
            "secret",
        ],
    ),
    (
        Category::Testing,
        &[
            "phpunit",
            "pest",
            "mock",
            "stubs",
            "stubbing",
            "unit test",
            "testing",
            "tests",
            "test case",
            "tdd",
            "assert",
            "coverage",
            "fixture",
        ],
    ),
    (
        Category::Performance,
        &[
            "cache",
            "caching",
            "n+1",
            "index",
            "slow",
            "performance",
            "optimi",
            "opcache",
            "profiler",
            "profiling",
            "latency",
            "memory",
            "eager load",
            "lazy load",
            "bottleneck",
        ],
    ),
    (
        Category::Framework,
        &[
            "eloquent",
            "artisan",
            "laravel",
            "symfony",
            "blade",
            "doctrine",
            "twig",
            "migration",
            "middleware",
            "service provider",
            "controller",
            "route",
        ],
    ),
    (
        Category::Architecture,
        &[
            "architecture",
            "design pattern",
            "solid principles",
            "repository",
            "dependency injection",
            "domain-driven",
            "ddd",
            "hexagonal",
            "interface",
            "refactor",
            "coupling",
            "service layer",
            "code review",
            "maintainab",
        ],
    ),
];

/// Outcome of classifying a question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Classification {
    pub category: Category,
    /// Keywords of the winning category found in the text; empty for `General`.
    pub matched_keywords: Vec<&'static str>,
}

/// Pick the category whose keywords appear most often in `text`.
///
/// Each distinct keyword counts once. Equal scores go to the higher-priority
/// category. No match at all yields `General`.
pub fn classify(text: &str) -> Classification {
    let haystack = text.to_lowercase();

    let mut best: Option<(Category, Vec<&'static str>)> = None;
    for (category, keywords) in KEYWORDS {
        let matched: Vec<&'static str> = keywords
            .iter()
            .copied()
            .filter(|kw| haystack.contains(kw))
            .collect();
        if matched.is_empty() {
            continue;
        }

        let better = match &best {
            None => true,
            Some((best_cat, best_matched)) => {
                matched.len() > best_matched.len()
                    || (matched.len() == best_matched.len() && category < best_cat)
            }
        };
        if better {
            best = Some((*category, matched));
        }
    }

    match best {
        Some((category, matched_keywords)) => Classification {
            category,
            matched_keywords,
        },
        None => Classification {
            category: Category::General,
            matched_keywords: Vec::new(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sql_injection_is_security() {
        assert_eq!(classify("How do I prevent SQL injection?").category, Category::Security);
    }

    #[test]
    fn n_plus_one_is_performance() {
        let c = classify("My queries are slow, N+1 problem");
        assert_eq!(c.category, Category::Performance);
        assert_eq!(c.matched_keywords, vec!["n+1", "slow"]);
    }

    #[test]
    fn phpunit_mock_is_testing() {
        let c = classify("How do I mock a repository in PHPUnit?");
        assert_eq!(c.category, Category::Testing);
        assert!(c.matched_keywords.contains(&"phpunit"));
        assert!(c.matched_keywords.contains(&"mock"));
    }

    #[test]
    fn eloquent_is_framework() {
        assert_eq!(
            classify("Should I run this from an Artisan command or an Eloquent observer?").category,
            Category::Framework
        );
    }

    #[test]
    fn gibberish_is_general() {
        let c = classify("unrelated gibberish xyz");
        assert_eq!(c.category, Category::General);
        assert!(c.matched_keywords.is_empty());
        assert_eq!(classify("").category, Category::General);
    }

    #[test]
    fn ties_go_to_higher_priority() {
        // one security keyword, one performance keyword
        assert_eq!(classify("csrf and cache").category, Category::Security);
        // one testing keyword, one framework keyword
        assert_eq!(classify("pest with laravel").category, Category::Testing);
        // one framework keyword, one architecture keyword
        assert_eq!(classify("refactor this middleware").category, Category::Framework);
    }

    #[test]
    fn higher_score_beats_priority() {
        let c = classify("slow page, no index, missing cache, but the password form too");
        assert_eq!(c.category, Category::Performance);
    }

    #[test]
    fn classification_is_deterministic() {
        let q = "Refactor my Laravel controller to use a repository and dependency injection";
        let first = classify(q);
        for _ in 0..10 {
            assert_eq!(classify(q), first);
        }
        assert_eq!(first.category, Category::Architecture);
    }

    #[test]
    fn dependency_injection_is_architecture() {
        let c = classify("How should I use dependency injection in my PHP app?");
        assert_eq!(c.category, Category::Architecture);
        assert_eq!(c.matched_keywords, vec!["dependency injection"]);
        assert_eq!(classify("Is command injection possible via exec()?").category, Category::Security);
    }

    #[test]
    fn stems_do_not_match_inside_unrelated_words() {
        assert_eq!(classify("Should I consolidate these helpers?").category, Category::General);
        assert_eq!(classify("How do I show the user profile page?").category, Category::General);
        assert_eq!(classify("This stubborn bug again").category, Category::General);
        assert_eq!(classify("Which profiler works with PHP 8?").category, Category::Performance);
        assert_eq!(classify("Explain SOLID principles").category, Category::Architecture);
    }

    #[test]
    fn no_keyword_contains_another_categorys_keyword() {
        for (category, keywords) in KEYWORDS {
            for (other, other_keywords) in KEYWORDS {
                if category == other {
                    continue;
                }
                for kw in *keywords {
                    for inner in *other_keywords {
                        assert!(
                            !kw.contains(inner),
                            "{category} keyword '{kw}' contains {other} keyword '{inner}'"
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn keywords_are_lowercase() {
        for (_, keywords) in KEYWORDS {
            for kw in *keywords {
                assert_eq!(*kw, kw.to_lowercase());
            }
        }
    }
}
