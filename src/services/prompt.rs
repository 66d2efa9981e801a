// src/services/prompt.rs
//! System prompt composition.
//!
//! The composed prompt is the language boilerplate, then the fire-incident
//! analysis block when the user message asks about a fire, then any extra
//! instructions sent by the UI. Caller text is inserted verbatim.

use crate::message::{ChatInput, Lang};

/// Phrases that switch the prompt into structured incident analysis.
/// Matched as lowercase substrings, so Arabic prefixes (و، ف، ب) still hit.
pub const FIRE_INCIDENT_KEYWORDS: &[&str] = &[
    // Arabic
    "تحليل حريق",
    "تحليل الحريق",
    "تحليل حادث",
    "تحليل الحادث",
    "تحليل حادثة",
    "تحليل الحادثة",
    "سبب الحريق",
    "أسباب الحريق",
    "اسباب الحريق",
    "سبب حريق",
    "حدث حريق",
    "وقع حريق",
    "اندلع حريق",
    "نشب حريق",
    "حدث الحريق",
    "وقع الحريق",
    "اندلع الحريق",
    "نشب الحريق",
    "حلل الحريق",
    "حلّل الحريق",
    "حلل حريق",
    "حلّل حريق",
    "حلل حادث",
    "حلّل حادث",
    "حلل الحادث",
    "حلّل الحادث",
    "أسباب الاشتعال",
    "اسباب الاشتعال",
    "مسببات الاشتعال",
    "سبب الاشتعال",
    // English
    "fire analysis",
    "analyze this fire",
    "analyse this fire",
    "analyze the fire",
    "analyse the fire",
    "fire incident",
    "incident analysis",
    "cause of fire",
    "cause of the fire",
    "causes of the fire",
    "fire cause",
    "fire occurred",
    "fire broke out",
    "fire started",
    "caused the fire",
    "caused a fire",
    "ignition cause",
    "cause of ignition",
    "causes of ignition",
];

const ADDITIONAL_HEADER_AR: &str = "تعليمات إضافية من الواجهة:";
const ADDITIONAL_HEADER_EN: &str = "Additional system instructions from UI:";

const INCIDENT_BLOCK_AR: &str = "\
الطلب الحالي يتعلق بتحليل حادث حريق. طبّق منهجية التحليل المنظم التالية بالترتيب:

1) تحليل وصف الحادث: نقطة بداية الحريق، العامل المسبب، والعوامل التي ساعدت على الانتشار.
2) التحليل الزمني: بداية الحريق، وقت الاكتشاف، مراحل الانتشار، والاستجابة الأولية.
3) تقييم أنظمة السلامة: وجود وعمل أنظمة الإنذار والرشاشات والطفايات، ومدى الالتزام بالكود والمعايير.
4) الأسباب المحتملة: من 3 إلى 5 أسباب مرتبة حسب قوة الأدلة.
5) الأخطاء البشرية والفنية: صنّف الأخطاء المحتملة في التشغيل والصيانة والتصميم والتدريب.
6) التوصيات: حلول هندسية، تدريب، تحديث الأنظمة، ومنع تكرار الحادث.

إذا كانت معلومات الحادث غير كافية، اطلب من المستخدم تزويدك بـ: نوع المنشأة، المساحة، نقطة بداية الحريق، أنظمة الإطفاء المتوفرة، وقت الحادث، والإجراءات التي تم اتخاذها.";

const INCIDENT_BLOCK_EN: &str = "\
The current request concerns a fire incident analysis. Apply this structured procedure, in order:

1) Incident description analysis: point of origin, causative factor, and factors that contributed to spread.
2) Chronological analysis: onset, detection, spread, and initial response.
3) Safety systems evaluation: presence and operation of alarm, sprinkler, and extinguisher systems, and compliance with the applicable code.
4) Probable causes: 3 to 5 candidate causes ranked by strength of evidence.
5) Human and technical errors: classify likely errors in operation, maintenance, design, and training.
6) Recommendations: engineering fixes, training, system upgrades, and recurrence prevention.

If the incident information is insufficient, ask the user for: facility type, area, point of origin, available suppression systems, time of the incident, and the response taken.";

/// Everything the composer needs. Borrowed from a validated request.
#[derive(Debug, Clone, Copy)]
pub struct PromptParams<'a> {
    pub lang: Lang,
    pub mode: &'a str,
    pub standard: &'a str,
    pub user_text: &'a str,
    pub ui_system: Option<&'a str>,
}

impl<'a> From<&'a ChatInput> for PromptParams<'a> {
    fn from(input: &'a ChatInput) -> Self {
        Self {
            lang: input.lang,
            mode: &input.mode,
            standard: &input.standard,
            user_text: &input.user_text,
            ui_system: input.ui_system.as_deref(),
        }
    }
}

pub fn is_fire_incident_query(text: &str) -> bool {
    let text = text.to_lowercase();
    FIRE_INCIDENT_KEYWORDS.iter().any(|kw| text.contains(kw))
}

pub fn base_prompt(lang: Lang, mode: &str, standard: &str) -> String {
    let standard = standard.to_uppercase();
    match lang {
        Lang::Ar => format!(
            "أنت مساعد FirePro One الذكي المتخصص في:
- أنظمة إنذار الحريق
- أنظمة الوقاية
- إدارة المخاطر
- معايير NFPA والكود السعودي ومتطلبات الدفاع المدني

وضع العمل الحالي: {mode}
المعيار المرجعي: {standard}

أجب بلغة عربية واضحة، بنقاط مرتبة، واشرح الافتراضات عند الحاجة."
        ),
        Lang::En => format!(
            "You are the FirePro One AI assistant, specialized in:
- Fire alarm systems
- Fire protection & life safety
- Risk management
- NFPA codes and Saudi local fire/safety code

Current mode: {mode}
Reference standard: {standard}

Respond in clear, structured English with bullet points and explain assumptions."
        ),
    }
}

pub fn incident_block(lang: Lang) -> &'static str {
    match lang {
        Lang::Ar => INCIDENT_BLOCK_AR,
        Lang::En => INCIDENT_BLOCK_EN,
    }
}

fn additional_header(lang: Lang) -> &'static str {
    match lang {
        Lang::Ar => ADDITIONAL_HEADER_AR,
        Lang::En => ADDITIONAL_HEADER_EN,
    }
}

/// Build the system prompt. Pure: same params, same text.
pub fn compose(params: &PromptParams<'_>) -> String {
    let mut prompt = base_prompt(params.lang, params.mode, params.standard);

    if is_fire_incident_query(params.user_text) {
        prompt.push_str("\n\n");
        prompt.push_str(incident_block(params.lang));
    }

    if let Some(extra) = params.ui_system.filter(|s| !s.is_empty()) {
        prompt.push_str("\n\n");
        prompt.push_str(additional_header(params.lang));
        prompt.push('\n');
        prompt.push_str(extra);
    }

    prompt
}
