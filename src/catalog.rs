use serde::{Deserialize, Serialize};

/// Identifiers of the offered courses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CourseId {
    PromptBasics,
    AiDevelopment,
}

impl CourseId {
    pub const ALL: [CourseId; 2] = [CourseId::PromptBasics, CourseId::AiDevelopment];

    pub fn as_str(&self) -> &'static str {
        match self {
            CourseId::PromptBasics => "prompt-basics",
            CourseId::AiDevelopment => "ai-development",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == s)
    }
}

/// Wire values accepted for the `course` field.
pub const COURSE_IDS: &[&str] = &["prompt-basics", "ai-development"];

#[derive(Debug, Serialize)]
pub struct CourseInfo {
    pub id: CourseId,
    pub title: &'static str,
    pub subtitle: &'static str,
    /// Tuition in yen.
    pub price: u32,
    pub duration: &'static str,
    pub schedule: &'static str,
    pub capacity: u32,
    pub deadline: &'static str,
    pub description: &'static str,
    pub features: &'static [&'static str],
    pub curriculum: &'static [CurriculumWeek],
}

#[derive(Debug, Serialize)]
pub struct CurriculumWeek {
    pub week: u8,
    pub title: &'static str,
    pub content: &'static [&'static str],
}

static COURSES: [CourseInfo; 2] = [
    CourseInfo {
        id: CourseId::PromptBasics,
        title: "プロンプト基礎コース",
        subtitle: "実務に直結する「集中型」生成AI講座",
        price: 50_000,
        duration: "2025年12月1日〜12月31日",
        schedule: "毎週日曜 9:00〜10:00",
        capacity: 10,
        deadline: "2025/11/30まで",
        description: "多くのスクールが座学中心で実務に落とし込むまで時間がかかる一方、本コースは「1ヶ月で学ぶ → 作る → 成果に活かす」を実現する実践型プログラムです。",
        features: &[
            "1ヶ月で「学ぶ」から「作る」まで到達",
            "座学は必要最低限、すぐ業務で使える内容に集中",
            "主要ツールを触りながら実践",
            "最終週には自分専用のAI Botや業務改善ワークフローを完成",
        ],
        curriculum: &[
            CurriculumWeek {
                week: 1,
                title: "プロンプト基礎",
                content: &[
                    "ChatGPT, Claude, Google AI Studio, NotebookLM, genspark, gamma など主要ツール網羅",
                ],
            },
            CurriculumWeek {
                week: 2,
                title: "画像生成AI基礎",
                content: &[],
            },
            CurriculumWeek {
                week: 3,
                title: "Cursorでの業務改善",
                content: &[],
            },
            CurriculumWeek {
                week: 4,
                title: "Obsidian x Cursorビジネス活用",
                content: &["自分専用のAI Botや業務改善ワークフローを完成"],
            },
        ],
    },
    CourseInfo {
        id: CourseId::AiDevelopment,
        title: "AI共同開発コース",
        subtitle: "バイブコーディングブートキャンプ",
        price: 100_000,
        duration: "2025年12月1日〜12月31日",
        schedule: "毎週日曜 10:00〜12:00",
        capacity: 10,
        deadline: "2025/11/30まで",
        description: "「なんか動いた」から「だから動いた」へ。見本動画を見ながらアプリを作成し、毎週公開・改善を繰り返す4週間。",
        features: &[
            "実践ファースト：初日からアプリを公開",
            "AI活用：生成AIにPMとして指示出し",
            "少人数制：定員10名、質問しやすい環境",
        ],
        curriculum: &[
            CurriculumWeek {
                week: 1,
                title: "LP/HP：要件・設計 → 初日デプロイ／フォーム・計測",
                content: &[],
            },
            CurriculumWeek {
                week: 2,
                title: "CRUD：投稿/編集/削除/一覧・バリデーション・API・本番ビルド",
                content: &[],
            },
            CurriculumWeek {
                week: 3,
                title: "会員制：サインアップ/ログイン、プロフィール、画像、検索、通知",
                content: &[],
            },
            CurriculumWeek {
                week: 4,
                title: "オーナー管理：管理画面、権限、分析、エラーログ、運用設計",
                content: &[],
            },
        ],
    },
];

pub fn courses() -> &'static [CourseInfo] {
    &COURSES
}

pub fn find(id: CourseId) -> Option<&'static CourseInfo> {
    COURSES.iter().find(|course| course.id == id)
}
