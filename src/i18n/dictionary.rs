use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Key → display string mapping for one region.
///
/// Deserialized from a flat JSON object of strings. A freshly loaded
/// dictionary always replaces the previous one; dictionaries are never merged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TranslationDictionary {
    entries: HashMap<String, String>,
}

impl TranslationDictionary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode a JSON object mapping string keys to string values
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Look up the display string for a key.
    ///
    /// Empty strings count as missing so the element keeps its markup text.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .get(key)
            .map(String::as_str)
            .filter(|value| !value.is_empty())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), value.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    /// Built-in strings used when a dictionary cannot be loaded.
    ///
    /// These are the Singapore strings; they are also used when loading the
    /// Malaysia dictionary fails.
    pub fn fallback() -> Self {
        FALLBACK_ENTRIES.iter().copied().collect()
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for TranslationDictionary {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

const FALLBACK_ENTRIES: &[(&str, &str)] = &[
    ("greeting", "Hi，初次见面～ (◕‿◕✿)"),
    ("callMe", "你可以叫我"),
    ("or", "或者像星星一样闪亮的名字"),
    ("alsoWorks", "也可以哦！✨"),
    ("birthTitle", "🎂 诞生小秘密"),
    ("birthToday", "今天、就是生日哦！(＊´∀｀*)ﾉ"),
    ("birthDesc1", "魔法绽放的第一天"),
    ("birthDesc2", "我"),
    ("languageTitle", "🗣️语言小口袋"),
    ("languages", "日语、English、简体中文、繁体中文"),
    ("allCan", "都可以哦～"),
    ("languageDesc", "切换语言就像换帽子一样好玩呢！(◕‿◕✿)）"),
    ("acgnTitle", "🌈 ACGN Fan"),
    ("acgnConfirm", "确认！"),
    ("acgnDesc1", "Anime、Manga、Game、Novel是我小宇宙的"),
    ("acgnDesc2", "基本粒子"),
    ("mindTitle", "💖 心灵小拼图 (INFJ-T 版)"),
    ("chargeMode", "充电能量场："),
    ("chargeDesc1", "83%需要安静的独处时间"),
    ("chargeDesc2", "（躲在被窝里看书最幸福啦～(｡>ㅅ<｡)）"),
    ("brainTheater", "脑内小剧场："),
    ("brainDesc1", "74%天马行空中"),
    ("brainDesc2", "（幻想世界的大门永远敞开！🚪✨）"),
    ("senseRadar", "感受力天线："),
    ("senseDesc1", "82%超敏感接收中"),
    ("senseDesc2", "（小情绪也许能感应到哦 (｡･ω･｡)）"),
    ("actionMode", "行动小策略："),
    ("actionDesc1", "83%Plan好才做喵"),
    ("actionDesc2", "（列清单是我的小爱好✓）"),
    ("moodBarometer", "心情小云朵："),
    ("moodDesc1", "82%容易下雨☁️➡️🌧️"),
    ("moodDesc2", "（但一道彩虹就能马上开心回啦！(๑>◡<๑)）"),
    ("luckyTitle", "🍀 幸运小雷达"),
    ("luckyDesc", "信号很弱中……（"),
    ("luckyDesc2", "捡到四叶草会爽一整天！"),
    ("gameTitle", "🎮 游戏小天地"),
    ("gameDesc", "目前只玩"),
    ("gameDesc2", "《Genshin》"),
    ("gameDesc3", "和"),
    ("gameDesc4", "《Honkai: Star Rail (崩铁)》"),
    ("gameDesc5", "哦～☆ﾐ(o･ω･)ﾉ）"),
    ("greeting2", "请多多指教～"),
    ("friendWish", "希望和你成为Kaki！一起分享快乐的小宇宙吧～ (●'◡'●) ♡"),
];
