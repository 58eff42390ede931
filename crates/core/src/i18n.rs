//! Interface strings and colour themes for the terminal client.

use serde::{Deserialize, Serialize};

use crate::models::{Language, Sentiment};

const TR: &[(&str, &str)] = &[
    ("auth.title", "AI Günlük Asistanım"),
    ("auth.subtitle", "Günlük duygularını paylaş, AI ile analiz et"),
    ("auth.email", "E-posta"),
    ("auth.password", "Şifre"),
    ("auth.login", "Giriş Yap"),
    ("auth.signup", "Kayıt Ol"),
    ("auth.fillAll", "Lütfen tüm alanları doldurun"),
    ("auth.loggedIn", "Giriş yapıldı"),
    ("auth.loggedOut", "Çıkış yapıldı"),
    ("auth.notLoggedIn", "Önce giriş yapmalısın"),
    ("home.title", "Günlük Kaydı"),
    ("home.howFeel", "Bugün nasıl hissediyorsun? Duygularını paylaş..."),
    ("home.enterText", "Lütfen bir metin girin"),
    ("home.analysisError", "Analiz yapılırken bir hata oluştu"),
    ("home.positive", "Pozitif"),
    ("home.neutral", "Nötr"),
    ("home.negative", "Negatif"),
    ("home.summary", "Özet"),
    ("home.suggestion", "Öneri"),
    ("home.saved", "✓ Kaydedildi"),
    ("history.title", "Geçmiş"),
    ("history.empty", "Henüz kayıt yok"),
    ("history.today", "Bugün"),
    ("history.yesterday", "Dün"),
    ("history.updated", "Kayıt güncellendi"),
    ("history.deleted", "Kayıt silindi"),
    ("weekly.title", "Haftalık Özet"),
    ("weekly.positive", "Pozitif"),
    ("weekly.neutral", "Nötr"),
    ("weekly.negative", "Negatif"),
    ("weekly.total", "Toplam"),
    ("weekly.entries", "Kayıt"),
    ("weekly.dominant", "Baskın duygu"),
    ("weekly.empty", "Bu hafta henüz kayıt yok"),
    ("profile.title", "Profil"),
    ("profile.stats", "İstatistikler"),
    ("profile.totalEntries", "Toplam Kayıt"),
    ("profile.thisWeek", "Bu Hafta"),
    ("profile.language", "Dil"),
    ("profile.turkish", "Türkçe"),
    ("profile.english", "English"),
    ("profile.signOut", "Çıkış Yap"),
    ("profile.deleteAll", "Tüm Verileri Sil"),
    ("profile.deleteSuccess", "Tüm kayıtlar silindi"),
    ("profile.deleteError", "Kayıtlar silinirken bir hata oluştu"),
    ("profile.photo", "Profil fotoğrafı"),
    ("profile.noPhoto", "Profil fotoğrafı yok"),
    ("profile.deletePhoto", "Fotoğrafı Sil"),
    ("profile.theme", "Tema"),
    ("profile.light", "Açık"),
    ("profile.dark", "Koyu"),
];

const EN: &[(&str, &str)] = &[
    ("auth.title", "AI Daily Assistant"),
    ("auth.subtitle", "Share your daily feelings, analyze with AI"),
    ("auth.email", "Email"),
    ("auth.password", "Password"),
    ("auth.login", "Sign In"),
    ("auth.signup", "Sign Up"),
    ("auth.fillAll", "Please fill in all fields"),
    ("auth.loggedIn", "Signed in"),
    ("auth.loggedOut", "Signed out"),
    ("auth.notLoggedIn", "You need to sign in first"),
    ("home.title", "Daily Entry"),
    ("home.howFeel", "How are you feeling today? Share your feelings..."),
    ("home.enterText", "Please enter some text"),
    ("home.analysisError", "An error occurred while analyzing"),
    ("home.positive", "Positive"),
    ("home.neutral", "Neutral"),
    ("home.negative", "Negative"),
    ("home.summary", "Summary"),
    ("home.suggestion", "Suggestion"),
    ("home.saved", "✓ Saved"),
    ("history.title", "History"),
    ("history.empty", "No entries yet"),
    ("history.today", "Today"),
    ("history.yesterday", "Yesterday"),
    ("history.updated", "Entry updated"),
    ("history.deleted", "Entry deleted"),
    ("weekly.title", "Weekly Summary"),
    ("weekly.positive", "Positive"),
    ("weekly.neutral", "Neutral"),
    ("weekly.negative", "Negative"),
    ("weekly.total", "Total"),
    ("weekly.entries", "Entries"),
    ("weekly.dominant", "Dominant mood"),
    ("weekly.empty", "No entries this week yet"),
    ("profile.title", "Profile"),
    ("profile.stats", "Statistics"),
    ("profile.totalEntries", "Total Entries"),
    ("profile.thisWeek", "This Week"),
    ("profile.language", "Language"),
    ("profile.turkish", "Türkçe"),
    ("profile.english", "English"),
    ("profile.signOut", "Sign Out"),
    ("profile.deleteAll", "Delete All Data"),
    ("profile.deleteSuccess", "All entries deleted"),
    ("profile.deleteError", "An error occurred while deleting entries"),
    ("profile.photo", "Profile photo"),
    ("profile.noPhoto", "No profile photo"),
    ("profile.deletePhoto", "Delete Photo"),
    ("profile.theme", "Theme"),
    ("profile.light", "Light"),
    ("profile.dark", "Dark"),
];

#[derive(Debug, Clone, Copy)]
pub struct Translator {
    language: Language,
}

impl Translator {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// Looks up `key`; unknown keys come back unchanged.
    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        let table = match self.language {
            Language::Tr => TR,
            Language::En => EN,
        };
        table
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, value)| *value)
            .unwrap_or(key)
    }

    pub fn sentiment_label(&self, sentiment: Sentiment) -> &'static str {
        match sentiment {
            Sentiment::Positive => self.t("home.positive"),
            Sentiment::Neutral => self.t("home.neutral"),
            Sentiment::Negative => self.t("home.negative"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "light" => Some(Self::Light),
            "dark" => Some(Self::Dark),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    pub fn palette(self) -> Palette {
        match self {
            Self::Light => Palette {
                background: "#f5f5f5",
                surface: "#ffffff",
                text: "#333333",
                text_secondary: "#666666",
                border: "#E5E5EA",
                primary: "#007AFF",
                error: "#FF3B30",
                tab_bar: "#ffffff",
                tab_bar_border: "#E5E5EA",
            },
            Self::Dark => Palette {
                background: "#000000",
                surface: "#1C1C1E",
                text: "#FFFFFF",
                text_secondary: "#8E8E93",
                border: "#38383A",
                primary: "#0A84FF",
                error: "#FF453A",
                tab_bar: "#1C1C1E",
                tab_bar_border: "#38383A",
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Palette {
    pub background: &'static str,
    pub surface: &'static str,
    pub text: &'static str,
    pub text_secondary: &'static str,
    pub border: &'static str,
    pub primary: &'static str,
    pub error: &'static str,
    pub tab_bar: &'static str,
    pub tab_bar_border: &'static str,
}

/// Display preferences handed to whatever renders output.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UiConfig {
    pub language: Language,
    pub theme: Theme,
}

impl UiConfig {
    pub fn translator(&self) -> Translator {
        Translator::new(self.language)
    }
}
