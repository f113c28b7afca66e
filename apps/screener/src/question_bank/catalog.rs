// Static interview questions by technology and difficulty.
// Keys are lowercase canonical names; aliases live in `ALIASES`.

pub(super) struct CatalogEntry {
    pub name: &'static str,
    pub beginner: &'static [&'static str],
    pub intermediate: &'static [&'static str],
    pub advanced: &'static [&'static str],
}

pub(super) const ALIASES: &[(&str, &str)] = &[
    ("js", "javascript"),
    ("ts", "typescript"),
    ("nodejs", "node"),
    ("node.js", "node"),
    ("reactjs", "react"),
    ("react.js", "react"),
    ("angularjs", "angular"),
    ("vuejs", "vue"),
    ("vue.js", "vue"),
    ("mongo", "mongodb"),
    ("postgres", "postgresql"),
    ("k8s", "kubernetes"),
    ("expressjs", "express"),
    ("express.js", "express"),
];

/// Used for technologies outside the catalog. `{tech}` is replaced with the name as typed.
pub(super) const GENERIC_TEMPLATES: &[&str] = &[
    "What are the key features and benefits of {tech}?",
    "How would you apply best practices when working with {tech}?",
    "What challenges have you faced while working with {tech} and how did you solve them?",
];

pub(super) const CATALOG: &[CatalogEntry] = &[
    CatalogEntry {
        name: "react",
        beginner: &[
            "What is the difference between props and state in React?",
            "What is the difference between controlled and uncontrolled components?",
            "Explain the concept of the Virtual DOM and its benefits.",
        ],
        intermediate: &[
            "What are React Hooks and how do they differ from class components?",
            "When would you reach for useMemo or useCallback, and when are they unnecessary?",
            "How do you handle side effects and cleanup with useEffect?",
        ],
        advanced: &[
            "How do you handle state management in a large React application?",
            "How would you optimize the performance of a React application?",
            "How does React reconciliation decide what to re-render, and how do keys affect it?",
        ],
    },
    CatalogEntry {
        name: "angular",
        beginner: &[
            "Explain the difference between Angular components and directives.",
            "How do you handle routing in Angular applications?",
            "What is data binding in Angular and which forms does it take?",
        ],
        intermediate: &[
            "What is dependency injection in Angular and why is it important?",
            "What are Angular services and how do you create them?",
            "Describe the Angular component lifecycle hooks.",
        ],
        advanced: &[
            "How does Angular change detection work and when would you use OnPush?",
            "How would you structure lazy-loaded feature modules in a large Angular app?",
            "How do you manage complex asynchronous flows with RxJS in Angular?",
        ],
    },
    CatalogEntry {
        name: "vue",
        beginner: &[
            "What are Vue directives and can you create custom ones?",
            "How do you handle component communication in Vue.js?",
            "What is the difference between computed properties and methods in Vue?",
        ],
        intermediate: &[
            "What is the Vue.js reactivity system and how does it work?",
            "Explain the difference between the Vue 2 Options API and the Vue 3 Composition API.",
            "How do slots work in Vue and when would you use scoped slots?",
        ],
        advanced: &[
            "How would you implement state management in a large Vue application?",
            "How do you optimize rendering performance in a Vue application?",
            "How would you set up server-side rendering for a Vue application?",
        ],
    },
    CatalogEntry {
        name: "javascript",
        beginner: &[
            "Explain the difference between let, const, and var in JavaScript.",
            "Explain the concept of hoisting in JavaScript.",
            "What is the difference between == and === in JavaScript?",
        ],
        intermediate: &[
            "What are closures in JavaScript? Provide an example.",
            "How does prototypal inheritance work in JavaScript?",
            "How do promises and async/await relate to each other?",
        ],
        advanced: &[
            "What is the event loop and how does it handle asynchronous operations?",
            "How would you track down a memory leak in a long-running JavaScript application?",
            "Explain microtasks versus macrotasks and how they affect execution order.",
        ],
    },
    CatalogEntry {
        name: "typescript",
        beginner: &[
            "What are the main benefits of using TypeScript over JavaScript?",
            "How do you handle optional properties and null checks in TypeScript?",
            "What is the difference between any and unknown?",
        ],
        intermediate: &[
            "Explain generics in TypeScript with an example.",
            "What is the difference between interface and type in TypeScript?",
            "How do discriminated unions help with type narrowing?",
        ],
        advanced: &[
            "What are decorators in TypeScript and how are they used?",
            "How do conditional and mapped types work? Give a practical use.",
            "How would you type a library API so that misuse fails at compile time?",
        ],
    },
    CatalogEntry {
        name: "python",
        beginner: &[
            "Explain the difference between lists and tuples in Python.",
            "How do you handle exceptions in Python applications?",
            "What are list comprehensions and when would you use them?",
        ],
        intermediate: &[
            "What are Python decorators and how do you create custom ones?",
            "How do generators differ from regular functions, and why use them?",
            "How do context managers work and how would you write one?",
        ],
        advanced: &[
            "What is the Global Interpreter Lock (GIL) in Python?",
            "How does Python's garbage collection work?",
            "When would you choose asyncio over threads or multiprocessing?",
        ],
    },
    CatalogEntry {
        name: "java",
        beginner: &[
            "Explain the core concepts of object-oriented programming in Java.",
            "What is the difference between abstract classes and interfaces?",
            "What is the difference between checked and unchecked exceptions?",
        ],
        intermediate: &[
            "What are Java Streams and how do you use them?",
            "How do equals and hashCode interact in collections?",
            "How does garbage collection work in Java?",
        ],
        advanced: &[
            "Explain multithreading in Java and how you avoid race conditions.",
            "How does the Java memory model define visibility between threads?",
            "How would you diagnose high GC pause times in a production JVM?",
        ],
    },
    CatalogEntry {
        name: "node",
        beginner: &[
            "What is the event-driven architecture in Node.js?",
            "What is the difference between require() and import in Node.js?",
            "What is npm and how do package.json and the lockfile relate?",
        ],
        intermediate: &[
            "How do you handle asynchronous operations in Node.js?",
            "Explain the concept of middleware in Express.js.",
            "How do streams work in Node.js and when would you use them?",
        ],
        advanced: &[
            "How do you find and fix memory leaks in Node.js applications?",
            "How would you use worker threads or clustering to scale a Node.js service?",
            "How do you avoid blocking the event loop with CPU-heavy work?",
        ],
    },
    CatalogEntry {
        name: "express",
        beginner: &[
            "What are Express.js middleware functions and how do they work?",
            "What is the difference between app.use() and app.get() in Express?",
            "How do you read route and query parameters in Express?",
        ],
        intermediate: &[
            "How do you handle errors in Express applications?",
            "How do you implement authentication in Express.js?",
            "How would you structure routers in a larger Express application?",
        ],
        advanced: &[
            "How do you implement rate limiting in Express.js?",
            "How would you secure an Express API against common web attacks?",
            "How do you gracefully shut down an Express server under load?",
        ],
    },
    CatalogEntry {
        name: "mongodb",
        beginner: &[
            "What is the difference between SQL and NoSQL databases?",
            "What is a document in MongoDB and how does it differ from a table row?",
            "How do you query nested fields in MongoDB?",
        ],
        intermediate: &[
            "How do you design schemas in MongoDB?",
            "What are MongoDB aggregation pipelines?",
            "How do you handle indexing in MongoDB for performance?",
        ],
        advanced: &[
            "Explain the concept of sharding in MongoDB.",
            "How do replica sets provide availability, and what are read concerns?",
            "When would you use multi-document transactions in MongoDB?",
        ],
    },
    CatalogEntry {
        name: "mysql",
        beginner: &[
            "What are the different types of JOINs in MySQL?",
            "What is database normalization and why is it important?",
            "What is the difference between a primary key and a unique key?",
        ],
        intermediate: &[
            "How do you optimize MySQL queries for better performance?",
            "How do you handle transactions in MySQL?",
            "How do you read and act on an EXPLAIN plan?",
        ],
        advanced: &[
            "What are stored procedures and when would you use them?",
            "How do InnoDB isolation levels affect concurrent transactions?",
            "How would you set up replication and handle failover in MySQL?",
        ],
    },
    CatalogEntry {
        name: "postgresql",
        beginner: &[
            "What are the advantages of PostgreSQL over other databases?",
            "Explain the ACID properties in PostgreSQL.",
            "What is the difference between a view and a materialized view?",
        ],
        intermediate: &[
            "How do you handle JSON data in PostgreSQL?",
            "How do you implement full-text search in PostgreSQL?",
            "What index types does PostgreSQL offer and when would you use each?",
        ],
        advanced: &[
            "What are PostgreSQL extensions and how do you use them?",
            "How does MVCC work in PostgreSQL and why does VACUUM matter?",
            "How would you partition a very large table in PostgreSQL?",
        ],
    },
    CatalogEntry {
        name: "aws",
        beginner: &[
            "What are the core services of AWS and their use cases?",
            "What is the difference between EC2 and Lambda?",
            "What is an S3 bucket and how do you control access to it?",
        ],
        intermediate: &[
            "How do you implement auto-scaling in AWS?",
            "How do you secure applications deployed on AWS?",
            "How do IAM roles differ from IAM users?",
        ],
        advanced: &[
            "Explain Infrastructure as Code on AWS and the tools you have used.",
            "How would you design a multi-region, highly available architecture on AWS?",
            "How do you keep AWS costs under control as usage grows?",
        ],
    },
    CatalogEntry {
        name: "docker",
        beginner: &[
            "What is containerization and how does Docker implement it?",
            "What is the difference between Docker images and containers?",
            "What does a Dockerfile contain?",
        ],
        intermediate: &[
            "How do you handle data persistence in Docker containers?",
            "Explain Docker networking and how containers communicate.",
            "How do you use Docker Compose for local development?",
        ],
        advanced: &[
            "How do you optimize Docker images for production?",
            "How do multi-stage builds work and why use them?",
            "How do you harden containers for security in production?",
        ],
    },
    CatalogEntry {
        name: "kubernetes",
        beginner: &[
            "What are Kubernetes pods and how do they work?",
            "Explain the concept of Kubernetes namespaces.",
            "What is the difference between a Deployment and a Pod?",
        ],
        intermediate: &[
            "How do you deploy applications to Kubernetes clusters?",
            "How do you handle service discovery in Kubernetes?",
            "How do ConfigMaps and Secrets differ and how are they consumed?",
        ],
        advanced: &[
            "What are the core components of Kubernetes architecture?",
            "How do you configure resource requests, limits and autoscaling?",
            "How would you roll out a change safely across a production cluster?",
        ],
    },
];
