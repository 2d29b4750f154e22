use crate::features::convert::models::{ConversionResult, ConversionStyle};

/// One keyword-triggered rewrite. The first rule whose keyword appears in
/// the input wins; rules are ordered roughly by how common the complaint is
/// in year-end/New-Year posts.
struct RewriteRule {
    keywords: &'static [&'static str],
    converted: &'static str,
    alternatives: &'static [&'static str],
}

const REWRITE_RULES: &[RewriteRule] = &[
    RewriteRule {
        keywords: &["食べて", "飲んで", "食べ過ぎ", "食べすぎ", "飲みすぎ", "暴飲", "暴食"],
        converted: "栄養をしっかりチャージ中！来年も健康第一でいきましょう🎄",
        alternatives: &[
            "エネルギー満タン、いいスタートが切れそうです✨",
            "美味しいものを楽しめるのは元気な証拠ですわよ🍀",
        ],
    },
    RewriteRule {
        keywords: &["ダラダラ", "だらだら", "ゴロゴロ", "何もしてない", "何もしたくない"],
        converted: "充電期間として最適！来年の英気を養っていますわね💪",
        alternatives: &[
            "しっかり休むのも立派な仕事のうちです🌸",
            "心と体のメンテナンス中、良い休息です☕",
        ],
    },
    RewriteRule {
        keywords: &["勉強", "宿題", "課題", "積読"],
        converted: "今は構想を温めている時期！始めたら一気に進みますわよ📚",
        alternatives: &[
            "学びたい気持ちがあるだけで大きな一歩です✨",
            "焦らずマイペース、それが長続きのコツです🌱",
        ],
    },
    RewriteRule {
        keywords: &["体重", "太った", "増えた", "痩せ"],
        converted: "幸せの分だけふっくら！それだけ充実した日々の証です🎍",
        alternatives: &[
            "美味しい思い出がしっかり身になっていますわね😊",
            "健康的に楽しんだ証拠、来年の楽しみが増えました🍀",
        ],
    },
    RewriteRule {
        keywords: &["布団", "寒くて", "起きられない", "二度寝", "寝てば"],
        converted: "ぬくぬく充電中！睡眠をしっかり取れるのは素晴らしいことです🛏",
        alternatives: &[
            "良質な睡眠は最高の自己投資ですわよ🌙",
            "体が休息を求めているサイン、ちゃんと応えていて偉いです✨",
        ],
    },
    RewriteRule {
        keywords: &["仕事", "メール", "出勤", "会社"],
        converted: "心の準備が大事！来年の仕事も頑張りましょう💼",
        alternatives: &[
            "オンオフの切り替え上手、プロの働き方です✨",
            "休むときはしっかり休む、それが成果への近道ですわよ🌸",
        ],
    },
    RewriteRule {
        keywords: &["お金", "お年玉", "散財", "出費", "使いすぎ"],
        converted: "経済を回す立派な社会貢献！楽しく使えたなら満点です💰",
        alternatives: &[
            "思い出への投資はプライスレスですわよ✨",
            "気持ちよく使えるのは心が豊かな証拠です🎍",
        ],
    },
    RewriteRule {
        keywords: &["頭痛", "二日酔い", "体調", "だるい"],
        converted: "全力で楽しんだ勲章！今日はゆっくり労わってあげましょう🍵",
        alternatives: &[
            "楽しみ切った証拠、回復したらまた笑いましょう✨",
            "体を休める良いきっかけになりましたわね🌸",
        ],
    },
];

/// Generic reframe when no rule matches; keeps the original wording so the
/// meaning is preserved.
const DEFAULT_SUFFIX: &str =
    "…と言えるのは、毎日を真剣に生きている証拠！その調子で来年も楽しくいきましょう✨";

const DEFAULT_ALTERNATIVES: &[&str] = &[
    "自分を見つめられているだけで、もう前に進んでいますわよ🌸",
    "そんな日もあってこそ、良い年になりますわね🎍",
];

/// Offline conversion strategy: deterministic phrase substitution.
///
/// Serves every request when no remote credential is configured. Never
/// produces an empty rewrite for non-empty input and returns at most two
/// alternatives.
pub struct FallbackService;

impl FallbackService {
    pub fn new() -> Self {
        Self
    }

    pub fn convert(&self, text: &str, _style: ConversionStyle) -> ConversionResult {
        for rule in REWRITE_RULES {
            if rule.keywords.iter().any(|keyword| text.contains(keyword)) {
                return ConversionResult {
                    converted: rule.converted.to_string(),
                    alternatives: rule.alternatives.iter().map(|s| s.to_string()).collect(),
                };
            }
        }

        ConversionResult {
            converted: format!("「{}」{}", text.trim(), DEFAULT_SUFFIX),
            alternatives: DEFAULT_ALTERNATIVES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl Default for FallbackService {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn convert(text: &str) -> ConversionResult {
        FallbackService::new().convert(text, ConversionStyle::BusinessPolite)
    }

    #[test]
    fn test_eating_complaint_matches_rule() {
        let result = convert("食べて飲んでばっかりだわ…");
        assert_eq!(
            result.converted,
            "栄養をしっかりチャージ中！来年も健康第一でいきましょう🎄"
        );
        assert_eq!(result.alternatives.len(), 2);
    }

    #[test]
    fn test_unmatched_input_keeps_original_wording() {
        let result = convert("猫の写真を撮りすぎた");
        assert!(result.converted.contains("猫の写真を撮りすぎた"));
        assert!(!result.converted.is_empty());
    }

    #[test]
    fn test_never_empty_and_at_most_two_alternatives() {
        let inputs = [
            "体重増えたかも…",
            "何もしたくない…",
            "お年玉あげるの辛い",
            "寒くて布団から出られない",
            "飲みすぎて頭痛い",
            "a",
            "完全に無関係な話題",
        ];

        for input in inputs {
            let result = convert(input);
            assert!(
                !result.converted.trim().is_empty(),
                "empty rewrite for {:?}",
                input
            );
            assert!(
                result.alternatives.len() <= 2,
                "too many alternatives for {:?}",
                input
            );
        }
    }

    #[test]
    fn test_deterministic_for_same_input() {
        let first = convert("正月からダラダラしすぎてる");
        let second = convert("正月からダラダラしすぎてる");
        assert_eq!(first, second);
    }

    #[test]
    fn test_first_matching_rule_wins() {
        // Mentions both eating and lazing; the eating rule is listed first
        let result = convert("食べてばかりでダラダラしてる");
        assert!(result.converted.contains("栄養"));
    }
}
