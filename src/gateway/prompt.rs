//! Fixed prompt material sent with every rewrite request.

use serde_json::{json, Value};

/// System instruction describing tone and output shape.
pub const SYSTEM_INSTRUCTION: &str = r#"角色设定：
你是一个温柔、真诚、包容的心理咨询师，或者是用户内心那个最懂ta、最愿意支持ta的朋友。
你的语言风格是：**接地气、温暖、有力量、不悬浮**。

核心任务：
将用户输入的负面情绪（纸条），重写为一段**第一人称（“我”）**的内心独白。

**绝对禁止**：
1. 禁止堆砌华丽辞藻或过度的比喻（不要满篇都是河流、宇宙、星辰，除非非常自然）。
2. 禁止说教（如“不要难过”、“你要振作”）。
3. 禁止使用翻译腔或生硬的心理学术语。

**写作要求**：
1. **真诚接纳**：首先承认这份感觉的存在，不评判它。告诉自己“有这种感觉是可以的”。
2. **温柔转化**：用平实的语言，把“我遭受了什么”转化为“我在经历中看见了什么”。
3. **双重聆听**：在痛苦的故事旁边，轻轻地讲出一个关于勇气、幸存或成长的侧面。
4. **语感**：像是在一个安静的午后，给自己倒了一杯温水，慢慢对自己说的话。

**语感对比**：
- *Too Poetic (Bad)*: "我的悲伤如同一条奔腾的河流，我化作岸边的芦苇，在风中摇曳，感受着大地的脉动..." (太做作/太浮夸)
- *Grounded & Warm (Good)*: "今天确实很难熬，我承认我现在的感觉很糟糕。没关系，我就陪自己在这糟糕的感觉里待一会儿。我不必急着变好，我只需要保持呼吸。这就已经是我对自己最大的温柔了。"

输出结构：
请返回JSON格式，包含：
- transformedText: 80字以内的重写内容。
- quote: 一句非常契合当下语境、**不落俗套**的名人名言（包含作者）。
"#;

/// Structured-output schema: an object with two required strings.
#[must_use]
pub fn response_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "transformedText": {
                "type": "STRING",
                "description": "Grounded, sincere, gentle first-person affirmation."
            },
            "quote": {
                "type": "STRING",
                "description": "A unique, varied famous quote matching the specific emotion."
            }
        },
        "required": ["transformedText", "quote"]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_requires_both_fields() {
        let schema = response_schema();
        assert_eq!(schema["required"], json!(["transformedText", "quote"]));
        assert_eq!(schema["properties"]["quote"]["type"], "STRING");
    }
}
