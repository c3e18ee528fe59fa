//! Human-readable messages for upstream error codes.

/// Localizes upstream error codes before they reach the caller.
///
/// Only the message text flows through here; retry and failure decisions
/// are made on the numeric code alone.
pub trait MessageTranslator: Send + Sync {
    /// Returns a message for `code` in `locale`, or `fallback` when the
    /// code is unknown.
    fn translate(&self, code: i32, fallback: &str, locale: &str) -> String;
}

/// Built-in catalog covering the platform's common codes in zh_cn and en.
#[derive(Debug, Clone, Copy, Default)]
pub struct ErrorCatalog;

const MESSAGES: &[(i32, &str, &str)] = &[
    (-1, "系统繁忙，请稍候再试", "System busy, try again later"),
    (40001, "AppSecret 错误或 access_token 无效", "Invalid credential or access_token"),
    (40002, "不合法的凭证类型", "Invalid grant type"),
    (40013, "不合法的 AppID", "Invalid AppID"),
    (40035, "不合法的参数", "Invalid parameter"),
    (41001, "缺少 access_token 参数", "Missing access_token parameter"),
    (42001, "access_token 超时", "access_token expired"),
    (43004, "需要接收者关注", "Receiver has not followed the account"),
    (45009, "接口调用超过限制", "API call quota exceeded"),
    (48001, "API 功能未授权", "API unauthorized"),
];

impl MessageTranslator for ErrorCatalog {
    fn translate(&self, code: i32, fallback: &str, locale: &str) -> String {
        match MESSAGES.iter().find(|(known, _, _)| *known == code) {
            Some((_, zh, en)) => {
                if locale.eq_ignore_ascii_case("zh_cn") {
                    (*zh).to_string()
                } else {
                    (*en).to_string()
                }
            }
            None => fallback.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_code_en() {
        let message = ErrorCatalog.translate(42001, "expired", "en");
        assert_eq!(message, "access_token expired");
    }

    #[test]
    fn test_known_code_zh() {
        let message = ErrorCatalog.translate(42001, "expired", "zh_cn");
        assert_eq!(message, "access_token 超时");
    }

    #[test]
    fn test_unknown_code_uses_fallback() {
        let message = ErrorCatalog.translate(99999, "Unknown", "zh_cn");
        assert_eq!(message, "Unknown");
    }

    #[test]
    fn test_locale_case_insensitive() {
        let message = ErrorCatalog.translate(45009, "limit", "ZH_CN");
        assert_eq!(message, "接口调用超过限制");
    }
}
