// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! Command router: ordered rules mapping an utterance to an [`Intent`].
//!
//! Rules are evaluated in registration order and the first match wins.
//! Order carries meaning: "müziği duraklat" must reach the pause rule
//! before the generic "dur" shutdown rule sees it.

use std::fmt;

use crate::actions::Platform;

/// Assistant behaviour that can be switched on and off by voice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    DeepThink,
    AutoQuestion,
    EmotionAware,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Toggle {
    On,
    Off,
    /// Neither direction was named; invert the current state.
    Flip,
}

impl Toggle {
    fn parse(text: &str) -> Self {
        if text.contains("aç") || text.contains("aktif") {
            Self::On
        } else if text.contains("kapat") || text.contains("pasif") {
            Self::Off
        } else {
            Self::Flip
        }
    }

    pub fn apply(self, current: bool) -> bool {
        match self {
            Self::On => true,
            Self::Off => false,
            Self::Flip => !current,
        }
    }
}

/// What the user asked for.
#[derive(Debug, Clone, PartialEq)]
pub enum Intent {
    /// Run the named entry of the action registry.
    Action(&'static str),
    /// Web search; `None` when the query still has to be asked for.
    Search(Option<String>),
    /// Canned conversational reply.
    SmartReply(&'static str),
    /// Ask which song to play; `None` when the platform must be asked first.
    AskSong(Option<Platform>),
    AskYoutuber,
    AskVideo,
    /// Spell text out; `None` when the text still has to be asked for.
    Spell(Option<String>),
    Weather,
    Time,
    EmotionSummary,
    ConversationAnalysis,
    AskQuestion,
    SetMode(Mode, Toggle),
    Motivate,
    Sleep,
    Wake,
    Help,
    Shutdown,
    /// Nothing matched; treat the utterance as conversation.
    Chat,
}

type Matcher = Box<dyn Fn(&str) -> Option<Intent> + Send + Sync>;

pub struct Rule {
    pub name: &'static str,
    /// Sample utterance, read out by the help command.
    pub example: &'static str,
    matcher: Matcher,
}

impl Rule {
    pub fn new<F>(name: &'static str, example: &'static str, matcher: F) -> Self
    where
        F: Fn(&str) -> Option<Intent> + Send + Sync + 'static,
    {
        Self {
            name,
            example,
            matcher: Box::new(matcher),
        }
    }

    /// Matches when any phrase occurs anywhere in the utterance.
    pub fn phrases(name: &'static str, phrases: &'static [&'static str], intent: Intent) -> Self {
        let example = phrases.first().copied().unwrap_or(name);
        Self::new(name, example, move |text| {
            phrases.iter().any(|p| text.contains(p)).then(|| intent.clone())
        })
    }

    pub fn matches(&self, text: &str) -> Option<Intent> {
        (self.matcher)(text)
    }
}

impl fmt::Debug for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("example", &self.example)
            .finish()
    }
}

const SMART_REPLIES: &[(&str, &str)] = &[
    ("selam", "Aleyküm selam"),
    ("nasılsın", "Teşekkür ederim, ben iyiyim. Siz nasılsınız?"),
    ("sen kimsin", "Ben JARVIS, size yardımcı olmak için buradayım!"),
    ("ne yapıyorsun", "Sizi dinliyorum ve komutlarınızı bekliyorum!"),
    ("teşekkür ederim", "Rica ederim, her zaman yanınızdayım!"),
    ("sağ ol", "Ne demek, ben buradayım!"),
    ("günaydın", "Günaydın! Harika bir gün geçirmenizi diliyorum!"),
    ("iyi geceler", "İyi geceler! Tatlı rüyalar!"),
    ("ne haber", "Her şey yolunda, sizden haber bekliyorum!"),
];

const SEARCH_PHRASES: &[&str] = &["google'da ara", "google ara", "arama yap"];
/// Queries this short are treated as missing.
const MIN_QUERY_CHARS: usize = 2;

/// Longest first so the whole phrase is stripped from the text to spell.
const SPELL_PHRASES: &[&str] = &["heceleyerek oku", "hecele"];

const SHUTDOWN_PHRASES: &[&str] = &["dur jarvis", "güle güle"];
/// Matched as whole words so "açık" never reads as "çık".
const SHUTDOWN_WORDS: &[&str] = &["kapan", "çık", "dur"];

/// Canned reply for a greeting or pleasantry, if the text contains one.
pub fn smart_reply(text: &str) -> Option<&'static str> {
    let lower = text.to_lowercase();
    SMART_REPLIES
        .iter()
        .find(|(key, _)| lower.contains(key))
        .map(|(_, reply)| *reply)
}

fn words(text: &str) -> impl Iterator<Item = &str> {
    text.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty())
}

pub(crate) fn has_word(text: &str, candidates: &[&str]) -> bool {
    words(text).any(|w| candidates.contains(&w))
}

fn search_query(text: &str) -> Option<Intent> {
    let phrase = SEARCH_PHRASES.iter().find(|p| text.contains(*p))?;
    let query = text.replacen(phrase, "", 1).trim().to_string();
    let query = (query.chars().count() > MIN_QUERY_CHARS).then_some(query);
    Some(Intent::Search(query))
}

fn spell_text(text: &str) -> Option<Intent> {
    let phrase = SPELL_PHRASES.iter().find(|p| text.contains(*p))?;
    let rest = text.replacen(phrase, "", 1).trim().to_string();
    Some(Intent::Spell((!rest.is_empty()).then_some(rest)))
}

fn mode_rule(name: &'static str, phrases: &'static [&'static str], mode: Mode) -> Rule {
    Rule::new(name, phrases[0], move |text| {
        phrases
            .iter()
            .any(|p| text.contains(p))
            .then(|| Intent::SetMode(mode, Toggle::parse(text)))
    })
}

#[derive(Debug, Default)]
pub struct CommandRouter {
    rules: Vec<Rule>,
}

impl CommandRouter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_defaults() -> Self {
        let mut router = Self::new();
        router.register_defaults();
        router
    }

    fn register_defaults(&mut self) {
        use Intent::*;

        self.push(Rule::phrases("spotify", &["spotify aç", "spotify'ı aç"], Action("spotify")));
        self.push(Rule::phrases("youtube", &["youtube aç", "youtube'u aç"], Action("youtube")));
        self.push(Rule::phrases("news", &["haberleri aç", "haber oku", "haberler"], Action("news")));
        self.push(Rule::phrases(
            "youtube_song",
            &["şarkıyı youtube dan aç", "youtube dan şarkı aç"],
            AskSong(Some(Platform::YouTube)),
        ));
        self.push(Rule::new("smart_reply", "nasılsın", |text| smart_reply(text).map(SmartReply)));
        self.push(mode_rule("deep_think", &["derin düşünme", "akıllı mod", "düşünme modu"], Mode::DeepThink));
        self.push(mode_rule("question_mode", &["soru modu", "soru sorma"], Mode::AutoQuestion));
        self.push(Rule::phrases(
            "ask_question",
            &["bana soru sor", "soru sor", "merak ettiğin", "günlük soru"],
            AskQuestion,
        ));
        self.push(Rule::phrases(
            "conversation_analysis",
            &["konuşma analizi", "ne konuştuk", "sohbet analizi"],
            ConversationAnalysis,
        ));
        self.push(Rule::phrases(
            "emotion_summary",
            &["duygu özet", "duygu analizi", "nasıl hissediyorum"],
            EmotionSummary,
        ));
        self.push(mode_rule("emotion_mode", &["duygu modu", "duygu farkındalık"], Mode::EmotionAware));
        self.push(Rule::new("search", SEARCH_PHRASES[0], search_query));
        self.push(Rule::phrases("pause", &["duraklat", "müziği durdur", "şarkıyı durdur"], Action("pause")));
        self.push(Rule::phrases("switch_tab", &["sekme değiştir"], Action("switch_tab")));
        self.push(Rule::phrases("netflix", &["netflix aç", "film aç"], Action("netflix")));
        self.push(Rule::phrases("maps", &["harita aç", "haritaları aç"], Action("maps")));
        self.push(Rule::phrases("change_song", &["şarkı değiştir", "müzik değiştir"], Action("next")));
        self.push(Rule::phrases("next_video", &["video değiştir", "sonraki video"], Action("next_video")));
        self.push(Rule::phrases("youtuber", &["video aç", "youtuber videosu aç"], AskYoutuber));
        self.push(Rule::phrases("video", &["video ara"], AskVideo));
        self.push(Rule::phrases("fullscreen", &["tam ekran", "fullscreen"], Action("fullscreen")));
        self.push(Rule::new("spell", SPELL_PHRASES[1], spell_text));
        self.push(Rule::phrases("resume", &["müzik devam et", "şarkı devam et"], Action("resume")));
        self.push(Rule::phrases("next", &["sonraki şarkı", "bir sonraki"], Action("next")));
        self.push(Rule::phrases("previous", &["önceki şarkı", "bir önceki"], Action("previous")));
        self.push(Rule::phrases("time", &["saat kaç", "saati söyle"], Time));
        self.push(Rule::phrases("weather", &["hava durumu", "hava nasıl"], Weather));
        self.push(Rule::phrases("motivate", &["beni öv", "motivasyon"], Motivate));
        self.push(Rule::new("sleep", "uyku modu", |text| {
            (text.contains("uyku modu") || has_word(text, &["uyu"])).then_some(Sleep)
        }));
        self.push(Rule::phrases("wake", &["uyan"], Wake));
        self.push(Rule::phrases("music", &["müzik aç", "şarkı aç"], AskSong(None)));
        self.push(Rule::phrases("volume_up", &["sesi aç"], Action("volume_up")));
        self.push(Rule::phrases("volume_down", &["sesi kıs"], Action("volume_down")));
        self.push(Rule::phrases("new_tab", &["sekme aç"], Action("new_tab")));
        self.push(Rule::phrases("close_tab", &["sekme kapat"], Action("close_tab")));
        self.push(Rule::phrases("help", &["yardım", "komutlar"], Help));
        self.push(Rule::new("shutdown", "kapan", |text| {
            let hit = SHUTDOWN_PHRASES.iter().any(|p| text.contains(p)) || has_word(text, SHUTDOWN_WORDS);
            hit.then_some(Shutdown)
        }));
    }

    /// Append a rule after all existing ones.
    pub fn push(&mut self, rule: Rule) {
        self.rules.push(rule);
    }

    /// Intent of the first matching rule, [`Intent::Chat`] when none match.
    pub fn route(&self, text: &str) -> Intent {
        let lower = text.trim().to_lowercase();
        self.rules
            .iter()
            .find_map(|rule| rule.matches(&lower))
            .unwrap_or(Intent::Chat)
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|r| r.name).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn route(text: &str) -> Intent {
        CommandRouter::with_defaults().route(text)
    }

    #[test]
    fn test_pause_before_generic_stop() {
        assert_eq!(route("müziği duraklat"), Intent::Action("pause"));
        assert_eq!(route("müziği durdur"), Intent::Action("pause"));
        assert_eq!(route("dur"), Intent::Shutdown);
        assert_eq!(route("dur jarvis"), Intent::Shutdown);
        assert_eq!(route("Güle güle"), Intent::Shutdown);
    }

    #[test]
    fn test_shutdown_words_are_whole_words() {
        assert_eq!(route("kapı açık"), Intent::Chat);
        assert_eq!(route("durum iyi"), Intent::Chat);
        assert_eq!(route("artık çık"), Intent::Shutdown);
    }

    #[test]
    fn test_direct_actions() {
        assert_eq!(route("Spotify aç"), Intent::Action("spotify"));
        assert_eq!(route("youtube'u aç lütfen"), Intent::Action("youtube"));
        assert_eq!(route("haberleri aç"), Intent::Action("news"));
        assert_eq!(route("sesi kıs"), Intent::Action("volume_down"));
        assert_eq!(route("bir sonraki şarkıya geç"), Intent::Action("next"));
    }

    #[test]
    fn test_search_query_extraction() {
        assert_eq!(
            route("google'da ara hava durumu"),
            Intent::Search(Some("hava durumu".into()))
        );
        assert_eq!(route("google'da ara"), Intent::Search(None));
        assert_eq!(route("arama yap ab"), Intent::Search(None));
    }

    #[test]
    fn test_mode_toggles() {
        assert_eq!(route("derin düşünme aç"), Intent::SetMode(Mode::DeepThink, Toggle::On));
        assert_eq!(route("soru modu kapat"), Intent::SetMode(Mode::AutoQuestion, Toggle::Off));
        assert_eq!(route("duygu modu"), Intent::SetMode(Mode::EmotionAware, Toggle::Flip));
        assert_eq!(route("duygu farkındalık pasif"), Intent::SetMode(Mode::EmotionAware, Toggle::Off));
    }

    #[test]
    fn test_toggle_apply() {
        assert!(Toggle::On.apply(false));
        assert!(!Toggle::Off.apply(true));
        assert!(Toggle::Flip.apply(false));
        assert!(!Toggle::Flip.apply(true));
    }

    #[test]
    fn test_smart_replies() {
        assert_eq!(route("selam"), Intent::SmartReply("Aleyküm selam"));
        assert_eq!(
            route("teşekkür ederim"),
            Intent::SmartReply("Rica ederim, her zaman yanınızdayım!")
        );
        assert_eq!(smart_reply("Nasılsın bugün"), Some("Teşekkür ederim, ben iyiyim. Siz nasılsınız?"));
        assert_eq!(smart_reply("film izledim"), None);
    }

    #[test]
    fn test_assistant_intents() {
        assert_eq!(route("saat kaç"), Intent::Time);
        assert_eq!(route("duygu özeti ver"), Intent::EmotionSummary);
        assert_eq!(route("nasıl hissediyorum"), Intent::EmotionSummary);
        assert_eq!(route("ne konuştuk"), Intent::ConversationAnalysis);
        assert_eq!(route("bana soru sor"), Intent::AskQuestion);
        assert_eq!(route("uyku modu"), Intent::Sleep);
        assert_eq!(route("uyu"), Intent::Sleep);
        assert_eq!(route("uyan"), Intent::Wake);
        assert_eq!(route("beni öv"), Intent::Motivate);
        assert_eq!(route("yardım"), Intent::Help);
        assert_eq!(route("bugün çok yoruldum"), Intent::Chat);
    }

    #[test]
    fn test_custom_rule_appended_last() {
        let mut router = CommandRouter::with_defaults();
        router.push(Rule::phrases("podcast", &["podcast aç", "hava durumu"], Intent::Chat));
        assert_eq!(router.rule_names().last(), Some(&"podcast"));
        // earlier rules still win for their own phrases
        assert_eq!(router.route("google ara hava durumu"), Intent::Search(Some("hava durumu".into())));
        assert_eq!(router.route("hava durumu"), Intent::Weather);
        assert_eq!(router.route("podcast aç"), Intent::Chat);
    }

    #[test]
    fn test_song_flows() {
        assert_eq!(route("müzik aç"), Intent::AskSong(None));
        assert_eq!(route("bir şarkı aç"), Intent::AskSong(None));
        assert_eq!(route("şarkıyı youtube dan aç"), Intent::AskSong(Some(Platform::YouTube)));
        assert_eq!(route("youtube dan şarkı aç"), Intent::AskSong(Some(Platform::YouTube)));
        assert_eq!(route("şarkı değiştir"), Intent::Action("next"));
        assert_eq!(route("müzik değiştir"), Intent::Action("next"));
    }

    #[test]
    fn test_video_flows() {
        assert_eq!(route("video aç"), Intent::AskYoutuber);
        assert_eq!(route("youtuber videosu aç"), Intent::AskYoutuber);
        assert_eq!(route("video ara"), Intent::AskVideo);
        assert_eq!(route("video değiştir"), Intent::Action("next_video"));
        // reaches the video rule before "bir sonraki" skips a track
        assert_eq!(route("bir sonraki video"), Intent::Action("next_video"));
    }

    #[test]
    fn test_spell_inline_text() {
        assert_eq!(route("hecele"), Intent::Spell(None));
        assert_eq!(route("heceleyerek oku"), Intent::Spell(None));
        assert_eq!(route("jarvis kelimesini hecele"), Intent::Spell(Some("jarvis kelimesini".into())));
    }

    #[test]
    fn test_weather() {
        assert_eq!(route("hava durumu"), Intent::Weather);
        assert_eq!(route("bugün hava nasıl"), Intent::Weather);
    }
}
