use clap::ValueEnum;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::core::WealthPositionResult;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Ja,
    En,
}

pub fn string_table(language: Language) -> Value {
    match language {
        Language::Ja => json!({
            "header": {
                "title": "富の位置可視化ツール",
                "about": "このツールについて"
            },
            "main": {
                "headline": "あなたの経済的立ち位置を知る",
                "subtitle": "年収と資産を入力するだけで、日本と世界での位置がわかります",
                "income": "年収（円）",
                "assets": "総資産（円）",
                "incomePlaceholder": "例: 5,000,000",
                "assetsPlaceholder": "例: 10,000,000",
                "calculate": "位置を計算する",
                "incomeHint": "税引き前の年間総収入を入力してください",
                "assetsHint": "預貯金、有価証券、不動産等の時価総額を入力してください"
            },
            "results": {
                "title": "計算結果",
                "japanPosition": "日本での位置",
                "worldPosition": "世界での位置",
                "topPercent": "上位 {percent}%",
                "wealthShare": "{region}の総資産の {share}% を保有",
                "estimatedRank": "推定順位: {rank}位"
            },
            "regions": {
                "japan": "日本",
                "world": "世界"
            },
            "disclaimer": {
                "privacy": "入力されたデータは計算のみに使用され、保存されることはありません。",
                "accuracy": "計算結果は統計的推定に基づくもので、実際の順位とは異なる場合があります。"
            },
            "toggle": "EN"
        }),
        Language::En => json!({
            "header": {
                "title": "Wealth Position Visualizer",
                "about": "About this tool"
            },
            "main": {
                "headline": "Discover Your Economic Position",
                "subtitle": "Simply enter your income and assets to see your position in Japan and the world",
                "income": "Annual Income (JPY)",
                "assets": "Total Assets (JPY)",
                "incomePlaceholder": "e.g., 5,000,000",
                "assetsPlaceholder": "e.g., 10,000,000",
                "calculate": "Calculate Position",
                "incomeHint": "Enter your pre-tax annual income",
                "assetsHint": "Enter total value of savings, securities, real estate, etc."
            },
            "results": {
                "title": "Results",
                "japanPosition": "Position in Japan",
                "worldPosition": "Position in the World",
                "topPercent": "Top {percent}%",
                "wealthShare": "Owns {share}% of {region}'s total wealth",
                "estimatedRank": "Estimated rank: #{rank}"
            },
            "regions": {
                "japan": "Japan",
                "world": "the world"
            },
            "disclaimer": {
                "privacy": "Your data is used only for calculations and is not stored.",
                "accuracy": "Results are based on statistical estimates and may differ from actual rankings."
            },
            "toggle": "JA"
        }),
    }
}

// Unknown keys come back unchanged.
pub fn translate(language: Language, key: &str, substitutions: &[(&str, &str)]) -> String {
    let table = string_table(language);
    let found = key
        .split('.')
        .try_fold(&table, |node, part| node.get(part))
        .and_then(Value::as_str);

    let Some(template) = found else {
        return key.to_string();
    };

    substitutions
        .iter()
        .fold(template.to_string(), |text, (name, value)| {
            text.replace(&format!("{{{name}}}"), value)
        })
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegionSummary {
    pub heading: String,
    pub top_percent: String,
    pub wealth_share: String,
    pub estimated_rank: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PositionSummary {
    pub language: Language,
    pub title: String,
    pub japan: RegionSummary,
    pub world: RegionSummary,
    pub disclaimers: Vec<String>,
}

pub fn summarize(result: &WealthPositionResult, language: Language) -> PositionSummary {
    let japan = region_summary(
        language,
        "results.japanPosition",
        "regions.japan",
        result.japan.percentile,
        format!("{:.4}", result.japan.wealth_share * 100.0),
        result.japan.estimated_rank,
    );
    let world = region_summary(
        language,
        "results.worldPosition",
        "regions.world",
        result.world.percentile,
        format!("{:.6}", result.world.wealth_share * 100.0),
        result.world.estimated_rank,
    );

    PositionSummary {
        language,
        title: translate(language, "results.title", &[]),
        japan,
        world,
        disclaimers: vec![
            translate(language, "disclaimer.privacy", &[]),
            translate(language, "disclaimer.accuracy", &[]),
        ],
    }
}

fn region_summary(
    language: Language,
    heading_key: &str,
    region_key: &str,
    percentile: f64,
    share: String,
    rank: u64,
) -> RegionSummary {
    let region = translate(language, region_key, &[]);
    let percent = format!("{percentile:.2}");
    let rank = group_thousands(rank);

    RegionSummary {
        heading: translate(language, heading_key, &[]),
        top_percent: translate(
            language,
            "results.topPercent",
            &[("percent", percent.as_str())],
        ),
        wealth_share: translate(
            language,
            "results.wealthShare",
            &[("region", region.as_str()), ("share", share.as_str())],
        ),
        estimated_rank: translate(
            language,
            "results.estimatedRank",
            &[("rank", rank.as_str())],
        ),
    }
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (digits.len() - idx) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    grouped
}
