//! Illustrations associated with each result type.

use log::warn;

use crate::config::ResultType;

#[derive(Eq, PartialEq, Debug, Clone, Copy)]
pub struct ResultImage {
    /// Path of the image, relative to the site root.
    pub src: &'static str,
    pub alt_bn: &'static str,
    pub alt_en: &'static str,
}

/// Used for labels that do not correspond to a result type.
pub const DEFAULT_IMAGE: ResultImage = ResultImage {
    src: "/results/default.png",
    alt_bn: "ভোটার টাইপ",
    alt_en: "Voter Type illustration",
};

impl ResultType {
    pub fn image(&self) -> ResultImage {
        match self {
            ResultType::LastMinuteSprinter => ResultImage {
                src: "/results/last_minute_sprinter.png",
                alt_bn: "লাস্ট-মিনিট স্প্রিন্টার",
                alt_en: "Last-Minute Sprinter illustration",
            },
            ResultType::PosterNostalgic2 => ResultImage {
                src: "/results/poster_nostalgic.png",
                alt_bn: "পোস্টার-নস্টালজিক",
                alt_en: "Poster Nostalgic illustration",
            },
            ResultType::InfoDetective => ResultImage {
                src: "/results/info_detective.png",
                alt_bn: "ইনফো-ডিটেকটিভ",
                alt_en: "Info Detective illustration",
            },
            ResultType::PhoneFreeHero => ResultImage {
                src: "/results/phone_free_hero.png",
                alt_bn: "ফোন-ফ্রি হিরো",
                alt_en: "Phone-Free Hero illustration",
            },
            ResultType::SealSniper => ResultImage {
                src: "/results/seal_sniper.png",
                alt_bn: "সিল-স্নাইপার",
                alt_en: "Seal Sniper illustration",
            },
            ResultType::ConfusionCute => ResultImage {
                src: "/results/confusion_but_cute.png",
                alt_bn: "কনফিউজড-বাট-কিউট",
                alt_en: "Confusion but Cute illustration",
            },
            ResultType::QueueZen => ResultImage {
                src: "/results/queue_zen_master.png",
                alt_bn: "লাইন-জেন মাস্টার",
                alt_en: "Queue Zen Master illustration",
            },
            ResultType::ProcessPro => ResultImage {
                src: "/results/process_pro.png",
                alt_bn: "প্রসেস-প্রো",
                alt_en: "Process Pro illustration",
            },
        }
    }
}

/// The image for a label coming from outside (URL, content file).
/// Falls back to `DEFAULT_IMAGE` if the label is not a result type.
pub fn result_image(label: &str) -> ResultImage {
    match ResultType::from_label(label) {
        Some(rt) => rt.image(),
        None => {
            warn!("result_image: no image mapping found for {:?}", label);
            DEFAULT_IMAGE
        }
    }
}

/// Labels among `labels` that have no image.
pub fn missing_image_mappings(labels: &[&str]) -> Vec<String> {
    labels
        .iter()
        .filter(|l| ResultType::from_label(l).is_none())
        .map(|l| l.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_result_type_has_an_image() {
        let labels: Vec<&str> = ResultType::ALL.iter().map(|rt| rt.as_str()).collect();
        assert!(missing_image_mappings(&labels).is_empty());
        for rt in ResultType::ALL {
            let img = rt.image();
            assert!(img.src.starts_with("/results/"));
            assert!(img.src.ends_with(".png"));
            assert!(!img.alt_bn.is_empty());
            assert_ne!(img, DEFAULT_IMAGE);
        }
    }

    #[test]
    fn unknown_labels_get_the_default_image() {
        assert_eq!(result_image("Mystery"), DEFAULT_IMAGE);
        assert_eq!(result_image("queuezen"), ResultType::QueueZen.image());
        assert_eq!(
            missing_image_mappings(&["SealSniper", "Mystery"]),
            vec!["Mystery".to_string()]
        );
    }
}
