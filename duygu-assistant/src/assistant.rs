// Copyright (c) 2025-2026 brdigetrlol. All rights reserved.
// SPDX-License-Identifier: LicenseRef-Icarus-Proprietary
// See LICENSE in the repository root for full license terms.

//! The assistant: routes utterances, runs actions, and keeps an emotion-aware
//! conversation going.
//!
//! The analyzer is shared as `Arc<Mutex<_>>` between the listening loop and
//! the sleep-mode conversation task. Locks are held only for the duration
//! of one analyzer call and never across an await point.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use chrono::{Local, Timelike};
use duygu_core::questions::{self, QuestionKind};
use duygu_core::{AnalysisContext, EmotionAnalyzer, EmotionalState};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use tracing::{debug, info, warn};

use crate::actions::{Action, ActionRegistry, ActionSink, Platform};
use crate::config::AssistantConfig;
use crate::router::{has_word, smart_reply, CommandRouter, Intent, Mode, Toggle};
use crate::speech::SpeechIo;

const INTERACTION: &str = "voice_command";
/// Chance of a deep-thinking remark on a chat turn.
const DEEP_RESPONSE_CHANCE: f32 = 0.2;
/// Texts up to this many characters get a generic question.
const FOLLOW_UP_MIN_CHARS: usize = 5;
const SLEEP_POLL: Duration = Duration::from_millis(200);

const ACTION_FAILED: &str = "İşlem gerçekleştirilemedi.";
const SEARCH_PROMPT: &str = "Google'da ne aramamı istersiniz?";
const PLATFORM_PROMPT: &str = "Hangi platformda açayım? YouTube veya Spotify?";
const PLATFORM_UNKNOWN: &str = "Anlayamadım, YouTube veya Spotify seçin";
const SONG_PROMPT: &str = "Hangi şarkıyı çalmamı istersiniz?";
const YOUTUBE_SONG_PROMPT: &str = "YouTube'da hangi şarkıyı açmamı istersiniz?";
const VIDEO_PROMPT: &str = "Hangi videoyu açmamı istersiniz?";
const SPELL_PROMPT: &str = "Hangi metni hecelememi istersiniz?";
const FAVORITE_YOUTUBERS: &[&str] = &["Enes Batur", "Ruhi Çenet", "Barış Özcan"];
const NO_EMOTION_DATA: &str = "Henüz yeterli veri yok. Benimle biraz daha konuşun.";
const NO_CONVERSATION_DATA: &str = "Henüz yeterli konuşma verisi yok.";
const NOT_UNDERSTOOD: &str = "Bu komutu anlamadım.";
const NOT_UNDERSTOOD_LISTENING: &str = "Bu komutu anlamadım, ama duygularınızı dinlemeye devam ediyorum.";
const SLEEP_ANNOUNCEMENT: &str = "Uyku moduna geçtim. Beni çağırmak için uyan demeniz yeterli.";
const WAKE_REPLY: &str = "Uyandım! Seni özlemiştim. Nasılsın?";
const ALREADY_AWAKE: &str = "Zaten uyanığım, sizi dinliyorum.";
const QUIET_REPLY: &str = "Tamam, sessizce dinliyorum. Beni istediğin zaman çağırabilirsin.";
const GOODBYE: &str = "JARVIS kapanıyor. Harika bir gün geçirmeni dilerim!";
const INTERRUPTED: &str = "Görüşürüz efendim!";

const SUPPORT_LINES: &[&str] = &[
    "Bu duyguyu hissetmek normal, yanındayım.",
    "Duyguların değerli, onları dinlemek önemli.",
    "Her duygu geçici, bu da geçecek.",
];

const GENERIC_QUESTIONS: &[&str] = &[
    "Size nasıl yardımcı olabilirim?",
    "Merak ettiğiniz bir konu var mı?",
    "Bugün nasılsınız?",
    "Size ne hakkında soru sormamı istersiniz?",
    "Benimle paylaşmak istediğiniz bir şey var mı?",
];

const MOTIVATIONAL_QUOTES: &[&str] = &[
    "Harika iş çıkarıyorsun, seninle gurur duyuyorum!",
    "İnanılmaz bir enerjin var, bu seni başarıya götürecek!",
    "Yapabileceğine inanıyorsun, değil mi? Çünkü ben inanıyorum!",
    "Bugün harika bir gün olacak, buna eminim!",
    "Çalışmaların gerçekten takdire şayan, böyle devam et!",
];

pub const SLEEP_QUESTIONS: &[&str] = &[
    "Nasılsın? Bugün neler yaptın?",
    "Seninle konuşmak güzel, bana biraz kendinden bahseder misin?",
    "Bugün en sevdiğin an neydi?",
    "Hayatında en çok neye değer veriyorsun?",
    "Yakın zamanda öğrendiğin ilginç bir şey var mı?",
];

pub const FRIENDLY_REPLIES: &[&str] = &[
    "Bu çok ilginç, devam edebilir misin?",
    "Seni dinlemek gerçekten güzel",
    "Bunu duyduğuma sevindim",
];

const WAKE_WORDS: &[&str] = &["uyan", "merhaba", "jarvis"];
const QUIET_WORDS: &[&str] = &["hayır", "yeter", "dur", "sus", "kapat"];

fn lock(analyzer: &Mutex<EmotionAnalyzer>) -> MutexGuard<'_, EmotionAnalyzer> {
    analyzer.lock().unwrap_or_else(PoisonError::into_inner)
}

fn pick<R: Rng + ?Sized>(lines: &[&str], rng: &mut R) -> String {
    lines.choose(rng).copied().unwrap_or_default().to_string()
}

/// Greeting for the given local hour.
pub fn welcome_message(hour: u32) -> &'static str {
    match hour {
        5..=11 => "Günaydın efendim! Yeni bir güne başlamak için harika bir zaman!",
        12..=16 => "Tünaydın efendim! Gününüz nasıl geçiyor?",
        17..=21 => "İyi akşamlar efendim! Günün yorgunluğunu atmaya hazır mısınız?",
        _ => "İyi geceler efendim! Hala burada olmanız harika!",
    }
}

/// Clock time the way it is read aloud: single digits get a leading "sıfır".
pub fn spoken_time(hour: u32, minute: u32) -> String {
    fn part(n: u32) -> String {
        if n < 10 {
            format!("sıfır {n}")
        } else {
            n.to_string()
        }
    }
    format!("Saat {} {}", part(hour), part(minute))
}

fn song_prompt(platform: Platform) -> &'static str {
    match platform {
        Platform::YouTube => YOUTUBE_SONG_PROMPT,
        Platform::Spotify => SONG_PROMPT,
    }
}

fn stability_phrase(stability: f32) -> &'static str {
    if stability > 0.7 {
        "Duygusal dengeniz oldukça stabil."
    } else if stability > 0.4 {
        "Duygusal dengeniz orta seviyede."
    } else {
        "Duygusal dalgalanmalar yaşıyorsunuz."
    }
}

/// Voice-switchable behaviour, all on at start.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Modes {
    pub emotion_aware: bool,
    pub deep_think: bool,
    pub auto_question: bool,
}

impl Default for Modes {
    fn default() -> Self {
        Self {
            emotion_aware: true,
            deep_think: true,
            auto_question: true,
        }
    }
}

/// Answer the assistant is waiting for. The next utterance fills it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pending {
    SearchQuery,
    Platform,
    Song(Platform),
    Youtuber,
    Video,
    Spelling,
}

pub struct Assistant<S, A> {
    analyzer: Arc<Mutex<EmotionAnalyzer>>,
    speech: Arc<S>,
    sink: A,
    router: CommandRouter,
    registry: ActionRegistry,
    config: AssistantConfig,
    rng: StdRng,
    modes: Modes,
    sleeping: Arc<AtomicBool>,
    /// Sleep-mode conversation is talking (cleared by "yeter", "sus", ...).
    sleep_chat: Arc<AtomicBool>,
    keep_listening: Arc<AtomicBool>,
    last_question: Option<Instant>,
    last_emotion_reply: Option<Instant>,
    pending: Option<Pending>,
}

impl<S: SpeechIo, A: ActionSink> Assistant<S, A> {
    pub fn new(config: AssistantConfig, speech: Arc<S>, sink: A) -> Self {
        let rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            analyzer: Arc::new(Mutex::new(EmotionAnalyzer::new(config.analyzer.clone()))),
            speech,
            sink,
            router: CommandRouter::with_defaults(),
            registry: ActionRegistry::with_defaults(),
            config,
            rng,
            modes: Modes::default(),
            sleeping: Arc::new(AtomicBool::new(false)),
            sleep_chat: Arc::new(AtomicBool::new(false)),
            keep_listening: Arc::new(AtomicBool::new(true)),
            last_question: None,
            last_emotion_reply: None,
            pending: None,
        }
    }

    pub fn with_router(mut self, router: CommandRouter) -> Self {
        self.router = router;
        self
    }

    pub fn with_registry(mut self, registry: ActionRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn analyzer(&self) -> Arc<Mutex<EmotionAnalyzer>> {
        Arc::clone(&self.analyzer)
    }

    pub fn speech(&self) -> Arc<S> {
        Arc::clone(&self.speech)
    }

    pub fn sink(&self) -> &A {
        &self.sink
    }

    pub fn modes(&self) -> Modes {
        self.modes
    }

    pub fn set_modes(&mut self, modes: Modes) {
        self.modes = modes;
    }

    pub fn is_sleeping(&self) -> bool {
        self.sleeping.load(Ordering::SeqCst)
    }

    pub fn is_sleep_chat_active(&self) -> bool {
        self.sleep_chat.load(Ordering::SeqCst)
    }

    pub fn pending(&self) -> Option<Pending> {
        self.pending
    }

    pub fn keep_listening(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.keep_listening)
    }

    fn speak(&self, text: &str) {
        info!(text, "speak");
        self.speech.speak(text);
    }

    /// Welcome for the current hour, then an opening question.
    pub fn greet(&mut self) {
        self.speak(welcome_message(Local::now().hour()));
        if self.modes.auto_question {
            let question = lock(&self.analyzer).opening_question(&mut self.rng);
            self.speak(&question);
        }
    }

    /// Handle one utterance. Returns `false` when the user asked to shut down.
    ///
    /// Only conversational turns (chat and smart replies) go through the
    /// emotion analyzer. Action commands, answers to a pending prompt and
    /// the other assistant commands are not analyzed, so they never show up
    /// in history, memory or the emotion summary.
    pub fn handle_command(&mut self, text: &str) -> bool {
        let command = text.trim().to_lowercase();
        if command.chars().count() < 2 {
            return true;
        }

        if self.is_sleeping() {
            self.handle_asleep(&command);
            return true;
        }

        if let Some(pending) = self.pending.take() {
            self.answer(pending, text.trim());
            return true;
        }

        let intent = self.router.route(&command);
        debug!(?intent, "routed");

        match intent {
            Intent::Action(name) => self.run_action(name),
            Intent::Search(Some(query)) => self.search(&query),
            Intent::Search(None) => self.prompt(SEARCH_PROMPT, Pending::SearchQuery),
            Intent::AskSong(None) => self.prompt(PLATFORM_PROMPT, Pending::Platform),
            Intent::AskSong(Some(platform)) => self.prompt(song_prompt(platform), Pending::Song(platform)),
            Intent::AskYoutuber => {
                let prompt = format!(
                    "Hangi youtuber'ın videosunu izlemek istersiniz? Örneğin: {}",
                    FAVORITE_YOUTUBERS.join(", ")
                );
                self.prompt(&prompt, Pending::Youtuber);
            }
            Intent::AskVideo => self.prompt(VIDEO_PROMPT, Pending::Video),
            Intent::Spell(Some(inline)) => self.spell(&inline),
            Intent::Spell(None) => self.prompt(SPELL_PROMPT, Pending::Spelling),
            Intent::Weather => self.weather(),
            Intent::SmartReply(reply) => {
                let state = self.observe(&command);
                self.speak(reply);
                if let Some(question) = self.ask_question(Some(&state), &command) {
                    self.speak(&question);
                }
            }
            Intent::Time => {
                let now = Local::now();
                self.speak(&spoken_time(now.hour(), now.minute()));
            }
            Intent::EmotionSummary => self.report_emotions(),
            Intent::ConversationAnalysis => self.report_conversation(),
            Intent::AskQuestion => {
                let kind = QuestionKind::ALL.choose(&mut self.rng).copied().unwrap_or(QuestionKind::Curiosity);
                let question = questions::create_question(kind, &mut self.rng);
                self.last_question = Some(Instant::now());
                self.speak(&question);
            }
            Intent::SetMode(mode, toggle) => self.set_mode(mode, toggle),
            Intent::Motivate => {
                let quote = pick(MOTIVATIONAL_QUOTES, &mut self.rng);
                self.speak(&quote);
            }
            Intent::Sleep => {
                self.sleeping.store(true, Ordering::SeqCst);
                self.sleep_chat.store(true, Ordering::SeqCst);
                self.speak(SLEEP_ANNOUNCEMENT);
            }
            Intent::Wake => self.speak(ALREADY_AWAKE),
            Intent::Help => self.help(),
            Intent::Shutdown => {
                self.farewell();
                return false;
            }
            Intent::Chat => self.chat(&command),
        }
        true
    }

    fn handle_asleep(&mut self, command: &str) {
        if WAKE_WORDS.iter().any(|w| command.contains(w)) {
            self.sleeping.store(false, Ordering::SeqCst);
            self.sleep_chat.store(false, Ordering::SeqCst);
            info!("woke up");
            self.speak(WAKE_REPLY);
            return;
        }
        if !self.is_sleep_chat_active() {
            return;
        }
        if has_word(command, QUIET_WORDS) {
            self.sleep_chat.store(false, Ordering::SeqCst);
            self.speak(QUIET_REPLY);
            return;
        }
        let reply = match smart_reply(command) {
            Some(reply) => reply.to_string(),
            None => pick(FRIENDLY_REPLIES, &mut self.rng),
        };
        self.speak(&reply);
    }

    /// Analyze a conversational turn and, when the feeling is clear and
    /// strong enough, answer it.
    fn observe(&mut self, text: &str) -> EmotionalState {
        let context = AnalysisContext::default().with_interaction(INTERACTION);
        let state = lock(&self.analyzer).analyze(text, &context);

        if !self.emotion_reply_due(&state) {
            return state;
        }
        self.last_emotion_reply = Some(Instant::now());
        let reply = lock(&self.analyzer).generate_response(&state, &mut self.rng);
        self.speak(&reply);
        if state.is_negative() {
            let support = pick(SUPPORT_LINES, &mut self.rng);
            self.speak(&support);
        }
        state
    }

    fn emotion_reply_due(&self, state: &EmotionalState) -> bool {
        self.modes.emotion_aware
            && state.intensity > self.config.emotion_reply_min_intensity
            && state.confidence > self.config.emotion_reply_min_confidence
            && self
                .last_emotion_reply
                .map_or(true, |t| t.elapsed() >= self.config.emotion_reply_cooldown())
    }

    /// Maybe ask a question after a turn: gated by the auto-question mode,
    /// the cooldown and `question_probability`.
    fn ask_question(&mut self, state: Option<&EmotionalState>, text: &str) -> Option<String> {
        if !self.modes.auto_question {
            return None;
        }
        if let Some(t) = self.last_question {
            if t.elapsed() < self.config.question_cooldown() {
                return None;
            }
        }
        if self.rng.gen::<f32>() >= self.config.question_probability {
            return None;
        }

        let follow_up = match state {
            Some(state) if text.chars().count() > FOLLOW_UP_MIN_CHARS => {
                lock(&self.analyzer).follow_up_question(state, text, &mut self.rng)
            }
            _ => None,
        };
        let question = follow_up.unwrap_or_else(|| pick(GENERIC_QUESTIONS, &mut self.rng));
        self.last_question = Some(Instant::now());
        Some(question)
    }

    fn chat(&mut self, text: &str) {
        let state = self.observe(text);

        if self.modes.deep_think && self.rng.gen::<f32>() < DEEP_RESPONSE_CHANCE {
            if let Some(remark) = self.deep_response() {
                self.speak(&remark);
            }
        }

        match self.ask_question(Some(&state), text) {
            Some(question) => self.speak(&question),
            None if self.modes.emotion_aware => self.speak(NOT_UNDERSTOOD_LISTENING),
            None => self.speak(NOT_UNDERSTOOD),
        }
    }

    /// A remark on the running conversation: a reflection on the dominant
    /// topic, else a note on the top recent topic once the talk is deep enough.
    fn deep_response(&mut self) -> Option<String> {
        let analyzer = lock(&self.analyzer);
        if let Some(reflection) = analyzer.reflective_response(&mut self.rng) {
            return Some(reflection);
        }
        let summary = analyzer.conversation_summary()?;
        if summary.conversation_depth <= 1 {
            return None;
        }
        let (topic, _) = summary.recent_topics.first()?;
        let t = topic.label();
        let remarks = [
            format!("Son zamanlarda {t} hakkında çok konuşuyoruz."),
            format!("{t} konusundaki sohbetimiz ilginç."),
            format!("{t} hakkında konuşmak bana ilginç geliyor."),
        ];
        remarks.choose(&mut self.rng).cloned()
    }

    fn prompt(&mut self, question: &str, pending: Pending) {
        self.speak(question);
        self.pending = Some(pending);
    }

    fn answer(&mut self, pending: Pending, reply: &str) {
        debug!(?pending, reply, "pending answer");
        match pending {
            Pending::SearchQuery => self.search(reply),
            Pending::Platform => match Platform::detect(reply) {
                Some(platform) => self.prompt(SONG_PROMPT, Pending::Song(platform)),
                None => {
                    self.speak(PLATFORM_UNKNOWN);
                    self.prompt(PLATFORM_PROMPT, Pending::Platform);
                }
            },
            Pending::Song(platform) => self.play_song(platform, reply),
            Pending::Youtuber => {
                self.speak(&format!("{reply} videoları açılıyor"));
                self.perform(&Platform::YouTube.search(reply));
            }
            Pending::Video => {
                self.speak(&format!("{reply} videosu aranıyor"));
                self.perform(&Platform::YouTube.search(reply));
            }
            Pending::Spelling => self.spell(reply),
        }
    }

    fn play_song(&mut self, platform: Platform, song: &str) {
        let announcement = match platform {
            Platform::YouTube => format!("YouTube'da {song} çalınıyor"),
            Platform::Spotify => format!("Spotify'da {song} aranıyor"),
        };
        self.speak(&announcement);
        self.perform(&platform.search(song));
    }

    fn spell(&self, text: &str) {
        let letters: Vec<String> = text.to_uppercase().chars().map(String::from).collect();
        self.speak(&format!("Heceleme: {}", letters.join(" ")));
        self.speak(&format!("Okunuş: {text}"));
    }

    fn weather(&self) {
        let city = &self.config.weather_city;
        self.speak(&format!("{city} için hava durumu açılıyor"));
        self.perform(&Action::search(&format!("hava durumu {city}")));
    }

    /// Execute one action; failures are logged and reported aloud.
    fn perform(&self, action: &Action) -> bool {
        match self.sink.execute(action) {
            Ok(()) => true,
            Err(e) => {
                warn!(?action, "action failed: {e:#}");
                self.speak(ACTION_FAILED);
                false
            }
        }
    }

    fn run_action(&mut self, name: &str) {
        let Some(entry) = self.registry.get(name) else {
            warn!(action = name, "no action registered");
            self.speak(ACTION_FAILED);
            return;
        };
        self.speak(&entry.announcement);
        for step in &entry.steps {
            if !self.perform(step) {
                return;
            }
        }
    }

    fn search(&mut self, query: &str) {
        self.speak(&format!("Google'da {query} aranıyor"));
        self.perform(&Action::search(query));
    }

    fn report_emotions(&mut self) {
        let summary = lock(&self.analyzer).emotion_summary();
        let Some(summary) = summary else {
            self.speak(NO_EMOTION_DATA);
            return;
        };
        let report = format!(
            "Son analizlerinize göre en sık {} hissediyorsunuz. {}",
            summary.most_common_emotion.label(),
            stability_phrase(summary.stability)
        );
        self.speak(&report);
        if self.modes.auto_question {
            let question = questions::create_question(QuestionKind::Emotional, &mut self.rng);
            self.speak(&question);
        }
    }

    fn report_conversation(&mut self) {
        let summary = lock(&self.analyzer).conversation_summary();
        let Some(summary) = summary else {
            self.speak(NO_CONVERSATION_DATA);
            return;
        };
        let mut report = format!("Toplam {} konuşma yaptık. ", summary.total_conversations);
        if !summary.recent_topics.is_empty() {
            let topics: Vec<&str> = summary.recent_topics.iter().take(2).map(|(t, _)| t.label()).collect();
            report.push_str(&format!("Son zamanlarda {} hakkında konuşuyoruz. ", topics.join(", ")));
        }
        if summary.questions_asked > 0 {
            report.push_str(&format!("Size {} soru sordum. ", summary.questions_asked));
        }
        self.speak(report.trim_end());
        if self.modes.auto_question {
            let question = questions::create_question(QuestionKind::Reflective, &mut self.rng);
            self.speak(&question);
        }
    }

    fn set_mode(&mut self, mode: Mode, toggle: Toggle) {
        let (flag, name) = match mode {
            Mode::DeepThink => (&mut self.modes.deep_think, "Derin düşünme"),
            Mode::AutoQuestion => (&mut self.modes.auto_question, "Otomatik soru sorma"),
            Mode::EmotionAware => (&mut self.modes.emotion_aware, "Duygu farkındalık"),
        };
        *flag = toggle.apply(*flag);
        let status = if *flag { "açık" } else { "kapalı" };
        info!(?mode, on = *flag, "mode changed");
        self.speak(&format!("{name} modu {status}."));
    }

    fn help(&self) {
        let mut examples: Vec<&str> = Vec::new();
        for rule in self.router.rules() {
            if !examples.contains(&rule.example) {
                examples.push(rule.example);
            }
        }
        self.speak(&format!("Kullanabileceğiniz komutlardan bazıları: {}.", examples.join(", ")));
    }

    fn farewell(&mut self) {
        if self.modes.emotion_aware {
            let summary = lock(&self.analyzer).emotion_summary();
            if let Some(summary) = summary {
                self.speak(&format!("Bugün en çok {} hissettiniz.", summary.most_common_emotion.label()));
            }
        }
        self.sleeping.store(false, Ordering::SeqCst);
        self.speak(GOODBYE);
    }

    /// Listen and dispatch until shutdown, the keep-listening flag drops, or
    /// the speech source closes. Empty listens just go round again.
    pub fn listen_loop(&mut self) {
        info!("listening");
        while self.keep_listening.load(Ordering::SeqCst) && self.speech.is_open() {
            let Some(text) = self
                .speech
                .listen(self.config.listen_timeout(), self.config.phrase_limit())
            else {
                continue;
            };
            debug!(text = %text, "heard");
            if !self.handle_command(&text) {
                self.keep_listening.store(false, Ordering::SeqCst);
            }
        }
        info!("listener stopped");
    }

    /// Task that talks while sleep mode is on. Shares this assistant's
    /// analyzer, speech and flags.
    pub fn sleep_conversation(&mut self) -> SleepConversation<S> {
        SleepConversation {
            analyzer: Arc::clone(&self.analyzer),
            speech: Arc::clone(&self.speech),
            sleeping: Arc::clone(&self.sleeping),
            sleep_chat: Arc::clone(&self.sleep_chat),
            keep_listening: Arc::clone(&self.keep_listening),
            interval: self.config.sleep_interval(),
            poll: SLEEP_POLL,
            rng: StdRng::seed_from_u64(self.rng.gen()),
        }
    }
}

/// Periodic questions while the assistant sleeps.
pub struct SleepConversation<S> {
    analyzer: Arc<Mutex<EmotionAnalyzer>>,
    speech: Arc<S>,
    sleeping: Arc<AtomicBool>,
    sleep_chat: Arc<AtomicBool>,
    keep_listening: Arc<AtomicBool>,
    interval: (Duration, Duration),
    poll: Duration,
    rng: StdRng,
}

impl<S: SpeechIo + 'static> SleepConversation<S> {
    /// Override the pause range between questions and the flag polling period.
    pub fn with_timing(mut self, interval: (Duration, Duration), poll: Duration) -> Self {
        self.interval = interval;
        self.poll = poll;
        self
    }

    fn active(&self) -> bool {
        self.keep_listening.load(Ordering::SeqCst)
            && self.sleeping.load(Ordering::SeqCst)
            && self.sleep_chat.load(Ordering::SeqCst)
    }

    fn next_line(&mut self) -> String {
        let reflection = lock(&self.analyzer).reflective_response(&mut self.rng);
        match reflection {
            Some(line) => line,
            None => pick(SLEEP_QUESTIONS, &mut self.rng),
        }
    }

    fn next_pause(&mut self) -> Duration {
        let (lo, hi) = self.interval;
        let lo = lo.as_millis() as u64;
        let hi = (hi.as_millis() as u64).max(lo);
        Duration::from_millis(self.rng.gen_range(lo..=hi))
    }

    /// Sleep for `total`, waking early once the conversation is no longer active.
    async fn pause(&self, total: Duration) {
        let deadline = tokio::time::Instant::now() + total;
        loop {
            let now = tokio::time::Instant::now();
            if now >= deadline || !self.active() {
                break;
            }
            tokio::time::sleep(self.poll.min(deadline - now)).await;
        }
    }

    pub async fn run(mut self) {
        debug!("sleep conversation started");
        while self.keep_listening.load(Ordering::SeqCst) {
            if !self.active() {
                tokio::time::sleep(self.poll).await;
                continue;
            }
            let line = self.next_line();
            let speech = Arc::clone(&self.speech);
            if let Err(e) = tokio::task::spawn_blocking(move || speech.speak(&line)).await {
                warn!("sleep-mode speech failed: {e}");
            }
            let pause = self.next_pause();
            self.pause(pause).await;
        }
        debug!("sleep conversation stopped");
    }
}

/// Run the assistant until shutdown or Ctrl-C.
pub async fn run<S, A>(mut assistant: Assistant<S, A>) -> Result<()>
where
    S: SpeechIo + 'static,
    A: ActionSink + 'static,
{
    let sleep_task = tokio::spawn(assistant.sleep_conversation().run());
    let keep_listening = assistant.keep_listening();
    let speech = assistant.speech();

    let listener = tokio::task::spawn_blocking(move || {
        assistant.greet();
        assistant.listen_loop();
    });

    tokio::select! {
        joined = listener => {
            joined.context("listener task failed")?;
        }
        signal = tokio::signal::ctrl_c() => {
            signal.context("waiting for ctrl-c")?;
            info!("interrupted");
            keep_listening.store(false, Ordering::SeqCst);
            speech.speak(INTERRUPTED);
        }
    }

    keep_listening.store(false, Ordering::SeqCst);
    sleep_task.await.context("sleep conversation task failed")?;
    Ok(())
}
