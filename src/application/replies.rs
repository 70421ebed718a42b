//! 固定话术
//!
//! 会话控制器写入会话记录的全部固定文案（俄语，面向终端用户）。
//! 集中在一个模块里，编排代码不散落字符串字面量

/// 选择体裁挑选模式时代表用户写入的意图消息
pub const GENRE_MODE_REQUEST: &str = "Подобрать жанры и теги.";

/// 选择章节摘要模式时代表用户写入的意图消息
pub const SUMMARY_MODE_REQUEST: &str = "AI-резюме главы...";

/// 选择简介模式时代表用户写入的意图消息
pub const ANNOTATION_MODE_REQUEST: &str = "Сгенерировать аннотацию...";

/// 进入章节摘要模式后的场景描述提示
pub const SUMMARY_SCENE_PROMPT: &str = "Отлично! Пожалуйста, опишите главу или сцену, для которой нужно создать резюме. Например: 'сцена, где герой впервые встречает дракона'.";

/// 后端没有带回反问时使用的兜底澄清文案
pub const SUMMARY_CLARIFICATION_FALLBACK: &str =
    "Не удалось найти указанную сцену. Попробуйте описать ее по-другому.";

/// 摘要生成失败的致歉文案
pub const SUMMARY_FAILURE: &str =
    "Произошла ошибка при создании резюме. Пожалуйста, попробуйте еще раз.";

/// 通用的后端失败致歉文案
pub const GENERIC_FAILURE: &str =
    "К сожалению, произошла ошибка при обработке вашего запроса.";

/// 非空体裁选择应用成功
pub const GENRES_APPLIED: &str = "Отлично! Выбранные жанры и теги добавлены в историю изменений. Теперь вы можете задать следующий вопрос.";

/// 空体裁选择：不是错误，给出专门的完成文案
pub const GENRES_EMPTY_SELECTION: &str =
    "Вы не выбрали ни одного жанра или тега. Режим подбора завершен. Можете задать другой вопрос.";

/// 简介应用成功
pub const ANNOTATION_APPLIED: &str = "Аннотация была успешно сохранена в истории изменений. Вы можете скачать ее из боковой панели.";

/// 简介变更的固定标题
pub const ANNOTATION_TITLE: &str = "Аннотация к книге";

/// 体裁变更导出文件的固定标题
pub const GENRES_EXPORT_TITLE: &str = "Жанры и теги";

/// 手稿装载成功的开场白
pub fn manuscript_loaded(file_name: &str) -> String {
    format!(
        "Файл \"{}\" был успешно загружен. Теперь вы можете работать с текстом. Воспользуйтесь меню опций или задайте свой вопрос.",
        file_name
    )
}

/// 章节摘要入账确认
pub fn summary_recorded(title: &str) -> String {
    format!(
        "Резюме для \"{}\" успешно создано и добавлено в историю. Вы можете скачать его из боковой панели.",
        title
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_manuscript_loaded_mentions_file_name() {
        let text = manuscript_loaded("книга.txt");
        assert!(text.contains("\"книга.txt\""));
    }

    #[test]
    fn test_apply_confirmations_are_distinct() {
        // 空选择与非空选择必须是两条不同的文案
        assert_ne!(GENRES_APPLIED, GENRES_EMPTY_SELECTION);
    }
}
