#[cfg(test)]
pub const POST_YAML: &str = "---
title: Nuxt Content で始めるブログ
description: How this blog is put together
date: 2024-11-01
tags:
  - nuxt
  - blog
image: /images/nuxt-content.png
---

# Nuxt Content で始めるブログ

Content lives in markdown files with a metadata header.

<!-- more -->

The rest of the post.
";

#[cfg(test)]
pub const POST_TOML: &str = "+++
title = \"Written in TOML\"
date = 2024-04-22
tags = [\"toml\"]
+++

Body of the TOML post.
";
