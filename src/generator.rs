//! Candidate brief generation: LLM when a key is configured, template otherwise.

use crate::api::{GlmClient, ask_with_backoff};
use crate::config::Config;
use crate::fallback::{build_fallback, fallback_brief};
use crate::models::{HistoryWindow, RunContext};
use itertools::Itertools;
use rand::Rng;
use tracing::{info, warn};

/// How many recent titles the prompt asks the model to avoid.
const EXCLUDE_HINT_TITLES: usize = 5;

/// Where the candidate text came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CandidateOrigin {
    Llm,
    Template,
}

/// Recent titles, most recent first, deduplicated, capped at five.
pub fn recent_titles(history: &HistoryWindow) -> Vec<&str> {
    history
        .entries
        .iter()
        .flat_map(|entry| entry.headlines.iter().map(|h| h.title.trim()))
        .unique()
        .take(EXCLUDE_HINT_TITLES)
        .collect()
}

/// Build the generation prompt for `ctx.display_date`.
pub fn build_prompt(ctx: &RunContext, history: &HistoryWindow) -> String {
    let date = &ctx.display_date;
    let titles = recent_titles(history);
    let exclude_hint = if titles.is_empty() {
        String::new()
    } else {
        format!("\n\n注意：请避免使用以下已出现的标题：\n{}", titles.join("\n"))
    };

    format!(
        "请生成一份{date}的法律简报。

要求：
1. 包含3-5条今日法律要闻（必须是{date}的最新新闻）
2. 涵盖最高法、最高检、司法部等官方动态
3. 专业简洁的摘要，每条新闻要有独特性和时效性
4. Markdown格式输出{exclude_hint}

输出格式：
# {date} 法律简报

**导语：** 简短导语（2-3句话总结当日法律动态）

---

## 1. 今日要闻

### 【来源】标题
- **来源**: xxx
- **时间**: {date}
- **摘要**: xxx
- **实务影响**: xxx

---

*本简报由AI自动生成，仅供学习参考*
"
    )
}

/// Template brief drawn from the fallback pool.
pub fn template_candidate<R: Rng + ?Sized>(config: &Config, ctx: &RunContext, rng: &mut R) -> String {
    let items = build_fallback(&config.fallback.pool, config.fallback.count, ctx, rng);
    fallback_brief(items, ctx).to_markdown()
}

/// Produce a candidate brief.
///
/// Without an API key, or when the LLM call fails after its retries, the
/// candidate is a template brief. This never fails.
pub async fn generate_candidate<R: Rng + ?Sized>(
    api_key: Option<&str>,
    config: &Config,
    ctx: &RunContext,
    history: &HistoryWindow,
    rng: &mut R,
) -> (String, CandidateOrigin) {
    let Some(api_key) = api_key.filter(|k| !k.trim().is_empty()) else {
        info!("No LLM API key set; using template content");
        return (template_candidate(config, ctx, rng), CandidateOrigin::Template);
    };

    let prompt = build_prompt(ctx, history);
    let client = match GlmClient::new(config.llm.clone(), api_key.to_string()) {
        Ok(client) => client,
        Err(e) => {
            warn!(error = %e, "Could not build LLM client; using template content");
            return (template_candidate(config, ctx, rng), CandidateOrigin::Template);
        }
    };

    match ask_with_backoff(client, &prompt, config.llm.max_retries).await {
        Ok(content) => {
            info!(chars = content.chars().count(), "LLM produced a candidate");
            (content, CandidateOrigin::Llm)
        }
        Err(e) => {
            warn!(error = %e, "LLM generation failed; using template content");
            (template_candidate(config, ctx, rng), CandidateOrigin::Template)
        }
    }
}
