//! 并查集
//!
//! 元素为稠密的 usize 下标，首次访问时自动加入

/// 并查集（按秩合并 + 路径减半）
#[derive(Debug, Clone, Default)]
pub struct UnionFind {
    parent: Vec<usize>,
    rank: Vec<u8>,
}

impl UnionFind {
    /// 创建空并查集
    pub fn new() -> Self {
        Self::default()
    }

    /// 预分配 `n` 个单元素集合
    pub fn with_capacity(n: usize) -> Self {
        let mut uf = Self::new();
        uf.ensure(n);
        uf
    }

    fn ensure(&mut self, len: usize) {
        while self.parent.len() < len {
            self.parent.push(self.parent.len());
            self.rank.push(0);
        }
    }

    /// 查找代表元
    pub fn find(&mut self, x: usize) -> usize {
        self.ensure(x + 1);
        let mut x = x;
        while self.parent[x] != x {
            let grand = self.parent[self.parent[x]];
            self.parent[x] = grand;
            x = grand;
        }
        x
    }

    /// 合并两个集合，原本已在同一集合时返回 false
    pub fn union(&mut self, a: usize, b: usize) -> bool {
        let ra = self.find(a);
        let rb = self.find(b);
        if ra == rb {
            return false;
        }
        match self.rank[ra].cmp(&self.rank[rb]) {
            std::cmp::Ordering::Less => self.parent[ra] = rb,
            std::cmp::Ordering::Greater => self.parent[rb] = ra,
            std::cmp::Ordering::Equal => {
                self.parent[rb] = ra;
                self.rank[ra] += 1;
            }
        }
        true
    }

    /// 两个元素是否在同一集合
    pub fn connected(&mut self, a: usize, b: usize) -> bool {
        self.find(a) == self.find(b)
    }

    /// 已登记的元素数量
    pub fn len(&self) -> usize {
        self.parent.len()
    }

    pub fn is_empty(&self) -> bool {
        self.parent.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_union_find_basic() {
        let mut uf = UnionFind::with_capacity(4);
        assert_eq!(uf.len(), 4);
        assert!(!uf.connected(0, 1));

        assert!(uf.union(0, 1));
        assert!(uf.union(2, 3));
        assert!(!uf.union(1, 0));
        assert!(uf.connected(0, 1));
        assert!(!uf.connected(1, 2));

        assert!(uf.union(1, 3));
        assert!(uf.connected(0, 2));
    }

    #[test]
    fn test_union_find_grows_on_demand() {
        let mut uf = UnionFind::new();
        assert!(uf.is_empty());
        assert_eq!(uf.find(9), 9);
        assert_eq!(uf.len(), 10);
        uf.union(9, 12);
        assert!(uf.connected(12, 9));
    }
}
