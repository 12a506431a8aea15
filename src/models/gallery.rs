use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Photo {
    pub src: &'static str,
    pub alt: &'static str,
    pub label: &'static str,
}

// Served in display order, oldest first
pub const PHOTOS: [Photo; 4] = [
    Photo { src: "images/1.jpg", alt: "The birthday girl at one year old", label: "1 Year Old" },
    Photo { src: "images/2.jpg", alt: "The birthday girl at two years old", label: "2 Years Old" },
    Photo { src: "images/3.jpg", alt: "The birthday girl at three years old", label: "3 Years Old" },
    Photo { src: "images/4.jpg", alt: "The birthday girl at almost four", label: "Almost 4!" },
];
