//! Replacement content used when a generated brief fails deduplication.
//!
//! The pool is hand-authored configuration data (see [`default_pool`]); it is
//! not generated and not itself checked against history.

use crate::models::{Brief, NewsItem, RunContext};
use rand::Rng;
use rand::seq::IndexedRandom;
use tracing::debug;

/// Number of items drawn into a fallback brief.
pub const DEFAULT_FALLBACK_COUNT: usize = 3;

/// Intro line used for template and fallback briefs.
pub const TEMPLATE_INTRO: &str = "今日法律界最新资讯更新。";

/// Footer line used for generated briefs.
pub const GENERATED_FOOTER: &str = "本简报由AI自动生成，仅供学习参考，不构成法律建议";

/// Draw `count` distinct items from `pool`.
///
/// Sampling is uniform without replacement; a pool smaller than `count` is
/// returned whole in random order. Items without a time are stamped with
/// `ctx.display_date`.
pub fn build_fallback<R: Rng + ?Sized>(
    pool: &[NewsItem],
    count: usize,
    ctx: &RunContext,
    rng: &mut R,
) -> Vec<NewsItem> {
    let picked: Vec<NewsItem> = pool
        .choose_multiple(rng, count)
        .cloned()
        .map(|mut item| {
            if item.time.is_none() {
                item.time = Some(ctx.display_date.clone());
            }
            item
        })
        .collect();
    debug!(pool = pool.len(), requested = count, picked = picked.len(), "Built fallback items");
    picked
}

/// Wrap items into a dated brief with the standard template intro.
pub fn fallback_brief(items: Vec<NewsItem>, ctx: &RunContext) -> Brief {
    Brief {
        date: ctx.today,
        intro: TEMPLATE_INTRO.to_string(),
        items,
        footer: GENERATED_FOOTER.to_string(),
    }
}

fn item(source: &str, title: &str, summary: &str, impact: &str) -> NewsItem {
    NewsItem {
        source: source.to_string(),
        title: title.to_string(),
        summary: Some(summary.to_string()),
        impact: Some(impact.to_string()),
        ..Default::default()
    }
}

/// The built-in pool of alternate items.
pub fn default_pool() -> Vec<NewsItem> {
    vec![
        item(
            "司法部",
            "《关于进一步完善法律援助工作的实施意见》发布",
            "司法部发布实施意见，进一步扩大法律援助覆盖面，提高法律援助质量。重点加强农民工、未成年人、残疾人等特殊群体的法律援助工作。",
            "切实保障困难群众获得法律援助的权利，促进社会公平正义。",
        ),
        item(
            "最高人民法院",
            "发布服务保障自由贸易试验区建设典型案例",
            "最高人民法院发布一批服务保障自由贸易试验区建设的典型案例，涵盖外商投资、国际贸易、金融创新等领域，为自贸试验区高质量发展提供司法保障。",
            "为自贸试验区建设提供清晰的司法指引，优化营商环境。",
        ),
        item(
            "最高人民检察院",
            "部署开展食品安全专项检察监督活动",
            "最高人民检察院决定在全国范围内开展食品安全专项检察监督活动，重点打击危害食品安全犯罪，完善食品安全领域检察公益诉讼制度。",
            "守护\"舌尖上的安全\"，保障人民群众身体健康。",
        ),
        item(
            "中国人大网",
            "《律师法》修订草案公开征求意见",
            "全国人大常委会公布《律师法》修订草案，向社会公开征求意见。修订草案完善了律师执业权利保障机制，规范了律师执业行为，加强了律师队伍建设。",
            "进一步完善律师制度，保障律师依法执业，发挥律师在法治建设中的作用。",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::markdown::{SectionName, parse_items, parse_sections};
    use chrono::NaiveDate;
    use rand::SeedableRng;
    use rand::rngs::StdRng;
    use std::collections::HashSet;

    fn ctx() -> RunContext {
        let date = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        RunContext::new(date, date.and_hms_opt(8, 0, 0).unwrap())
    }

    #[test]
    fn test_picks_exactly_count_distinct_items() {
        let pool = default_pool();
        for seed in 0..20 {
            let mut rng = StdRng::seed_from_u64(seed);
            let picked = build_fallback(&pool, 3, &ctx(), &mut rng);
            assert_eq!(picked.len(), 3);
            let titles: HashSet<_> = picked.iter().map(|i| i.title.as_str()).collect();
            assert_eq!(titles.len(), 3);
        }
    }

    #[test]
    fn test_small_pool_returned_whole() {
        let pool: Vec<NewsItem> = default_pool().into_iter().take(2).collect();
        let mut rng = StdRng::seed_from_u64(1);
        let picked = build_fallback(&pool, 3, &ctx(), &mut rng);
        assert_eq!(picked.len(), 2);
    }

    #[test]
    fn test_stamps_missing_time_only() {
        let mut pool = default_pool();
        pool[0].time = Some("2024年12月31日".to_string());
        let mut rng = StdRng::seed_from_u64(3);
        let picked = build_fallback(&pool, 4, &ctx(), &mut rng);
        for item in &picked {
            if item.source == "司法部" {
                assert_eq!(item.time.as_deref(), Some("2024年12月31日"));
            } else {
                assert_eq!(item.time.as_deref(), Some("2025年06月01日"));
            }
        }
    }

    #[test]
    fn test_empty_pool() {
        let mut rng = StdRng::seed_from_u64(0);
        assert!(build_fallback(&[], 3, &ctx(), &mut rng).is_empty());
    }

    #[test]
    fn test_fallback_brief_round_trips_through_parser() {
        let mut rng = StdRng::seed_from_u64(42);
        let items = build_fallback(&default_pool(), 3, &ctx(), &mut rng);
        let md = fallback_brief(items.clone(), &ctx()).to_markdown();

        let parsed = parse_sections(&md);
        assert_eq!(parsed.intro.as_deref(), Some(TEMPLATE_INTRO));
        let today = parsed.section(SectionName::Today).unwrap();
        assert_eq!(parse_items(&today.lines), items);
    }
}
