//! Pre-written results for when the live rewrite cannot complete.

use crate::domain::Transformation;
use crate::infrastructure::RandomSource;
use std::sync::Arc;

/// The fallback pool as `(transformed_text, quote)` pairs.
pub const FALLBACKS: [(&str, &str); 5] = [
    (
        "这一刻确实不容易，我感觉到心里的那个结。我不需要立刻解开它，只需要轻轻地把手放在上面，告诉自己：我在呢，我陪着你。",
        "我们必须接受失望，因为它是有限的，但千万不可失去希望，因为它是无穷的。 —— 马丁·路德·金",
    ),
    (
        "我不必时刻坚强，也会有想哭的时候。眼泪不是软弱，它是情绪在帮我排毒。哭过之后，我会感觉轻盈一些，这就足够了。",
        "世界上只有一种真正的英雄主义，那就是在认清生活的真相后依然热爱生活。 —— 罗曼·罗兰",
    ),
    (
        "也许我现在做不到最好，但这不代表我不好。我正在按照自己的节奏在这个世界上行走，每一步都算数。",
        "人生的路，要靠自己一步一步去走，真正能保护你的，是你自己的人格选择和文化选择。 —— 杨绛",
    ),
    (
        "虽然现在周围有点黑，但我知道这只是暂时的。我不需要去寻找光，因为我自己就是那个拿着手电筒的人。",
        "生活不是等待风暴过去，而是学会在雨中跳舞。 —— 维维安·格林",
    ),
    (
        "我允许自己犯错，允许自己不完美。这些缝隙正好让真实的我也能透透气。我接纳完整的自己，包括那些有点灰暗的部分。",
        "爱自己是终身浪漫的开始。 —— 王尔德",
    ),
];

/// Draws uniformly from [`FALLBACKS`].
#[derive(Clone)]
pub struct FallbackPool {
    random: Arc<dyn RandomSource>,
}

impl FallbackPool {
    #[must_use]
    pub fn new(random: Arc<dyn RandomSource>) -> Self {
        Self { random }
    }

    /// Returns one pre-written result.
    #[must_use]
    pub fn pick(&self) -> Transformation {
        let index = self.random.index(FALLBACKS.len()).min(FALLBACKS.len() - 1);
        let (text, quote) = FALLBACKS[index];
        Transformation::new(text, quote)
    }

    /// Returns `true` if `transformation` is one of the pre-written results.
    #[must_use]
    pub fn contains(transformation: &Transformation) -> bool {
        FALLBACKS
            .iter()
            .any(|(text, quote)| transformation.transformed_text == *text && transformation.quote == *quote)
    }
}

impl std::fmt::Debug for FallbackPool {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackPool").field("size", &FALLBACKS.len()).finish()
    }
}
