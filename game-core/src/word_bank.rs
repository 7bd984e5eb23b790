use game_types::Category;
use std::collections::HashMap;
use thiserror::Error;

use crate::RandomSource;

const STANDARD_CATALOG: [(Category, [&str; 20]); 6] = [
    (
        Category::Animals,
        [
            "猫", "狗", "鸟", "鱼", "兔子", "老虎", "狮子", "大象", "熊猫", "猴子",
            "蛇", "马", "牛", "羊", "猪", "鸡", "鸭", "蝴蝶", "蜜蜂", "乌龟",
        ],
    ),
    (
        Category::Food,
        [
            "苹果", "香蕉", "西瓜", "草莓", "蛋糕", "披萨", "汉堡", "冰淇淋", "面包", "鸡蛋",
            "米饭", "面条", "饺子", "包子", "葡萄", "橙子", "胡萝卜", "西红柿", "玉米", "薯条",
        ],
    ),
    (
        Category::Objects,
        [
            "房子", "汽车", "飞机", "轮船", "自行车", "电视", "电脑", "手机", "书", "钟表",
            "伞", "眼镜", "帽子", "鞋子", "椅子", "桌子", "灯泡", "钥匙", "杯子", "相机",
        ],
    ),
    (
        Category::Nature,
        [
            "太阳", "月亮", "星星", "云朵", "彩虹", "山", "河流", "大海", "树", "花",
            "草", "雪花", "雨滴", "闪电", "火", "沙漠", "瀑布", "火山", "岛屿", "森林",
        ],
    ),
    (
        Category::People,
        [
            "医生", "警察", "老师", "厨师", "消防员", "宇航员", "农民", "画家", "歌手", "运动员",
            "护士", "司机", "飞行员", "科学家", "工人", "学生", "舞蹈家", "魔术师", "小丑", "超人",
        ],
    ),
    (
        Category::Activities,
        [
            "跑步", "游泳", "踢足球", "打篮球", "弹钢琴", "画画", "唱歌", "跳舞", "钓鱼", "滑雪",
            "骑马", "开车", "飞行", "做饭", "睡觉", "读书", "写字", "打电话", "拍照", "购物",
        ],
    ),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("catalog has no categories")]
    Empty,
    #[error("category {0} is listed more than once")]
    DuplicateCategory(Category),
    #[error("category {0} has no words")]
    EmptyCategory(Category),
    #[error("category {0} contains a blank word")]
    BlankWord(Category),
    #[error("word '{word}' appears in both {first} and {second}")]
    DuplicateWord {
        word: String,
        first: Category,
        second: Category,
    },
}

/// Immutable categorized vocabulary.
#[derive(Debug, Clone)]
pub struct WordBank {
    categories: Vec<(Category, Vec<String>)>,
    all_words: Vec<String>,
    word_to_category: HashMap<String, Category>,
}

impl WordBank {
    /// Build a word bank, checking that every category is non-empty and
    /// that no word appears in more than one category.
    pub fn new(categories: Vec<(Category, Vec<String>)>) -> Result<Self, CatalogError> {
        if categories.is_empty() {
            return Err(CatalogError::Empty);
        }

        let mut word_to_category = HashMap::new();
        let mut seen_categories = Vec::with_capacity(categories.len());

        for (category, words) in &categories {
            if seen_categories.contains(category) {
                return Err(CatalogError::DuplicateCategory(*category));
            }
            seen_categories.push(*category);

            if words.is_empty() {
                return Err(CatalogError::EmptyCategory(*category));
            }

            for word in words {
                if word.trim().is_empty() {
                    return Err(CatalogError::BlankWord(*category));
                }
                if let Some(first) = word_to_category.insert(word.clone(), *category) {
                    return Err(CatalogError::DuplicateWord {
                        word: word.clone(),
                        first,
                        second: *category,
                    });
                }
            }
        }

        let all_words = categories
            .iter()
            .flat_map(|(_, words)| words.iter().cloned())
            .collect();

        Ok(Self {
            categories,
            all_words,
            word_to_category,
        })
    }

    /// The built-in six-category vocabulary.
    pub fn standard() -> Result<Self, CatalogError> {
        let categories = STANDARD_CATALOG
            .iter()
            .map(|(category, words)| (*category, words.iter().map(|w| w.to_string()).collect()))
            .collect();

        Self::new(categories)
    }

    /// Pick a category uniformly, then a word uniformly within it.
    ///
    /// Small categories are therefore over-represented compared to a flat
    /// draw over all words.
    pub fn random_word<R: RandomSource + ?Sized>(&self, rng: &mut R) -> (String, Category) {
        let (category, words) = &self.categories[rng.next_index(self.categories.len())];
        let word = &words[rng.next_index(words.len())];
        (word.clone(), *category)
    }

    /// Words of a category in catalog order; empty if the category is not in this bank.
    pub fn words_in_category(&self, category: Category) -> &[String] {
        self.categories
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, words)| words.as_slice())
            .unwrap_or(&[])
    }

    /// Every word, flattened in catalog order.
    pub fn all_words(&self) -> &[String] {
        &self.all_words
    }

    pub fn category_of(&self, word: &str) -> Option<Category> {
        self.word_to_category.get(word).copied()
    }

    pub fn categories(&self) -> impl Iterator<Item = Category> + '_ {
        self.categories.iter().map(|(category, _)| *category)
    }

    pub fn len(&self) -> usize {
        self.all_words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.all_words.is_empty()
    }
}
