//! User-facing text for the claim page.
//!
//! Every string the page shows lives in a [`Messages`] table, one per
//! [`Locale`]. Handlers and views never inline literals.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Supported page locales
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum Locale {
    #[default]
    #[serde(rename = "en")]
    En,
    #[serde(rename = "zh-CN")]
    ZhCn,
}

impl Locale {
    pub fn tag(&self) -> &'static str {
        match self {
            Locale::En => "en",
            Locale::ZhCn => "zh-CN",
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}


/// Message table for one locale
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Messages {
    pub request_tokens_title: &'static str,
    pub faucet_details_title: &'static str,
    pub general_information_title: &'static str,
    pub general_information: &'static [&'static str],
    pub networks_heading: &'static str,

    pub enter_email_prompt: &'static str,
    pub email_placeholder: &'static str,
    pub code_placeholder: &'static str,
    pub consent_label: &'static str,

    pub button_enter_address: &'static str,
    pub button_invalid_address: &'static str,
    pub button_not_allowed: &'static str,
    pub button_request_code: &'static str,
    pub button_verify: &'static str,
    pub button_processing: &'static str,
    pub button_already_claimed: &'static str,

    pub claimed_first: &'static str,
    pub claimed_again: &'static str,

    pub code_sent: &'static str,
    pub code_send_failed: &'static str,
    pub token_issued: &'static str,
    pub code_incorrect: &'static str,
    pub network_error: &'static str,
}

/// English text
pub const EN: Messages = Messages {
    request_tokens_title: "Request Tokens",
    faucet_details_title: "Faucet Details",
    general_information_title: "General Information",
    general_information: &[
        "Enter an email address you can read: a verification code is sent there first.",
        "Once the code is verified, the API token is delivered to the same address.",
        "You can claim from the faucet once every 24 hours.",
    ],
    networks_heading: "Supported networks",

    enter_email_prompt: "Enter your email address to receive a ChatGPT API token:",
    email_placeholder: "support@openfox.cloud",
    code_placeholder: "Enter verification code",
    consent_label: "I promise not to abuse the API.",

    button_enter_address: "Enter a Valid Address",
    button_invalid_address: "Invalid Email Address",
    button_not_allowed: "Not Allowed",
    button_request_code: "Request Code",
    button_verify: "Verify",
    button_processing: "Processing...",
    button_already_claimed: "Tokens Already Claimed",

    claimed_first: "You have successfully claimed tokens. You can request again in 24 hours.",
    claimed_again: "You have already claimed tokens today. Please try again in 24 hours.",

    code_sent: "A verification code has been sent to your email. \
                Please check it and enter the code.",
    code_send_failed: "Failed to send the verification code. Please try again.",
    token_issued: "Your token has been sent to your email.",
    code_incorrect: "The verification code is incorrect. Please try again.",
    network_error: "Network error. Please try again later.",
};

/// Simplified Chinese text
pub const ZH_CN: Messages = Messages {
    request_tokens_title: "索取 Token",
    faucet_details_title: "水龙头说明",
    general_information_title: "基本信息",
    general_information: &[
        "请输入您能查收的邮箱地址：验证码会先发送到该邮箱。",
        "验证码校验通过后，API token 将发送到同一邮箱。",
        "每 24 小时可以领取一次。",
    ],
    networks_heading: "支持的网络",

    enter_email_prompt: "输入您的邮箱地址以获取 ChatGPT API token：",
    email_placeholder: "support@openfox.cloud",
    code_placeholder: "输入验证码",
    consent_label: "我保证不会滥用 API。",

    button_enter_address: "输入有效的地址",
    button_invalid_address: "无效的电子邮件地址",
    button_not_allowed: "不允许",
    button_request_code: "索取验证码",
    button_verify: "验证",
    button_processing: "处理中...",
    button_already_claimed: "已领取",

    claimed_first: "领取成功，24 小时后可再次领取。",
    claimed_again: "您今天已经领取过了，请 24 小时后再试。",

    code_sent: "验证码已发送至您的邮箱，请检查并输入",
    code_send_failed: "发送验证码失败，请重试",
    token_issued: "邮箱成功收到token",
    code_incorrect: "验证码不正确，请重试",
    network_error: "网络错误，请稍后重试",
};

impl Messages {
    /// Message table for the given locale
    pub fn for_locale(locale: Locale) -> &'static Messages {
        match locale {
            Locale::En => &EN,
            Locale::ZhCn => &ZH_CN,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locale_serde_tags() {
        let json = serde_json::to_string(&Locale::ZhCn).unwrap();
        assert_eq!(json, "\"zh-CN\"");
        let parsed: Locale = serde_json::from_str("\"en\"").unwrap();
        assert_eq!(parsed, Locale::En);
        assert!(serde_json::from_str::<Locale>("\"fr\"").is_err());
        assert_eq!(Locale::ZhCn.to_string(), "zh-CN");
    }


    #[test]
    fn test_tables_are_selected_by_locale() {
        assert_eq!(Messages::for_locale(Locale::En).button_not_allowed, "Not Allowed");
        assert_eq!(Messages::for_locale(Locale::ZhCn).button_verify, "验证");
        assert_eq!(Locale::default(), Locale::En);
    }

    #[test]
    fn test_claimed_text_mentions_cooldown() {
        for messages in [&EN, &ZH_CN] {
            assert!(messages.claimed_again.contains("24"));
            assert!(messages.claimed_first.contains("24"));
        }
    }
}
